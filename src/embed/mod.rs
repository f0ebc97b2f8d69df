//! Embedding-session client.
//!
//! Lets any screen embed one externally-hosted dashboard by id without
//! knowing the token protocol. A mount is: clear the container, mint a
//! guest token scoped to the dashboard, hand the SDK the id, the host
//! domain and a [`ScopedTokenProvider`], then install the returned handle.
//! The SDK refreshes tokens through the provider on its own schedule.
//!
//! Failures surface once, through [`MountEvents::on_error`] and the
//! returned error, and leave the container empty. There is no automatic
//! retry; the caller remounts if it wants another attempt.

pub mod catalog;
pub mod container;
pub mod events;
pub mod sdk;

pub use catalog::CatalogClient;
pub use container::EmbedContainer;
pub use events::MountEvents;
pub use sdk::{EmbedSdk, GuestTokenProvider, MountHandle, ScopedTokenProvider, SdkMountRequest};

use log::{debug, warn};
use std::sync::Arc;

use crate::error::{Result, SimaLinkError};
use crate::http::HttpTransport;
use crate::models::{GuestTokenRequest, GuestTokenResponse};

const GUEST_TOKEN_PATH: &str = "/api/embed/guest-token/";

/// Mint a guest token scoped to one dashboard and verify the scope the
/// backend granted matches the one requested. Shared by the initial mount
/// and by every SDK-driven refresh.
pub(crate) async fn mint_scoped_token(
    transport: &HttpTransport,
    dashboard_id: &str,
) -> Result<GuestTokenResponse> {
    transport.session().require_session()?;

    debug!("[EMBED] Requesting guest token for dashboard {}", dashboard_id);
    let request = GuestTokenRequest::for_dashboard(dashboard_id);
    let response: GuestTokenResponse = transport.post_json(GUEST_TOKEN_PATH, &request).await?;

    if response.dashboard_uuid != dashboard_id {
        return Err(SimaLinkError::InternalError(format!(
            "Guest token scope mismatch: requested dashboard {}, backend granted {}",
            dashboard_id, response.dashboard_uuid
        )));
    }
    Ok(response)
}

/// Client for embedding dashboards through the configured [`EmbedSdk`].
#[derive(Clone)]
pub struct EmbedClient {
    transport: HttpTransport,
    sdk: Arc<dyn EmbedSdk>,
}

impl EmbedClient {
    pub(crate) fn new(transport: HttpTransport, sdk: Arc<dyn EmbedSdk>) -> Self {
        Self { transport, sdk }
    }

    /// Mint a guest token scoped to `dashboard_id`.
    ///
    /// [`mount`] does this internally; calling it directly is only useful
    /// for hosts that drive an embedding SDK themselves.
    ///
    /// [`mount`]: EmbedClient::mount
    pub async fn guest_token(&self, dashboard_id: &str) -> Result<GuestTokenResponse> {
        if dashboard_id.trim().is_empty() {
            return Err(SimaLinkError::ValidationError(
                "A dashboard id is required.".to_string(),
            ));
        }
        mint_scoped_token(&self.transport, dashboard_id).await
    }

    /// Embed one dashboard into `container`.
    ///
    /// Any previous mount in the container is torn down first, so calling
    /// this again with a different id is the idempotent "remount on id
    /// change" path. On success the new mount is installed and
    /// [`MountEvents::on_load`] fires; on any failure the container stays
    /// empty, [`MountEvents::on_error`] fires with a display-ready message,
    /// and the error is returned. One attempt per call.
    pub async fn mount(
        &self,
        dashboard_id: &str,
        container: &mut EmbedContainer,
        events: &MountEvents,
    ) -> Result<()> {
        container.clear();

        if dashboard_id.trim().is_empty() {
            let err =
                SimaLinkError::ValidationError("A dashboard id is required.".to_string());
            events.emit_error(&err.display_message());
            return Err(err);
        }

        let minted = match mint_scoped_token(&self.transport, dashboard_id).await {
            Ok(minted) => minted,
            Err(e) => {
                warn!("[EMBED] Guest token request failed for dashboard {}: {}", dashboard_id, e);
                events.emit_error(&e.display_message());
                return Err(e);
            },
        };

        let provider = Arc::new(ScopedTokenProvider::new(
            dashboard_id.to_string(),
            self.transport.clone(),
            minted.token,
        ));
        let request = SdkMountRequest {
            dashboard_id: dashboard_id.to_string(),
            domain: minted.domain,
            token_provider: provider,
        };

        match self.sdk.mount(request).await {
            Ok(handle) => {
                container.install(handle);
                debug!("[EMBED] Mounted dashboard {}", dashboard_id);
                events.emit_load();
                Ok(())
            },
            Err(e) => {
                warn!("[EMBED] SDK mount failed for dashboard {}: {}", dashboard_id, e);
                events.emit_error(&e.display_message());
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionEvents, SessionHandle};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RefusingSdk;

    #[async_trait]
    impl EmbedSdk for RefusingSdk {
        async fn mount(&self, _request: SdkMountRequest) -> Result<Box<dyn MountHandle>> {
            panic!("the SDK must not be reached when earlier steps fail");
        }
    }

    fn offline_client() -> EmbedClient {
        let session =
            SessionHandle::new(Box::new(MemorySessionStore::new()), SessionEvents::new());
        let transport = HttpTransport::new(
            "http://127.0.0.1:9".to_string(),
            reqwest::Client::new(),
            session,
        );
        EmbedClient::new(transport, Arc::new(RefusingSdk))
    }

    #[tokio::test]
    async fn test_mount_rejects_empty_dashboard_id() {
        let client = offline_client();
        let mut container = EmbedContainer::new();

        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let events = MountEvents::new().on_error(move |m| sink.lock().unwrap().push(m));

        let err = client.mount("  ", &mut container, &events).await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
        assert!(!container.is_mounted());
        assert_eq!(errors.lock().unwrap().as_slice(), ["A dashboard id is required."]);
    }

    #[tokio::test]
    async fn test_mount_without_session_fires_on_error() {
        let client = offline_client();
        let mut container = EmbedContainer::new();

        let loads = Arc::new(AtomicUsize::new(0));
        let load_counter = Arc::clone(&loads);
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let events = MountEvents::new()
            .on_load(move || {
                load_counter.fetch_add(1, Ordering::SeqCst);
            })
            .on_error(move |m| sink.lock().unwrap().push(m));

        let err = client.mount("dash-uuid-1", &mut container, &events).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!container.is_mounted());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert_eq!(errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_guest_token_rejects_empty_id() {
        let client = offline_client();
        let err = client.guest_token("").await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }
}
