//! Seam between this crate and the third-party embedding SDK.
//!
//! The crate never talks to the embedding host directly. It mints guest
//! tokens from the portal backend and hands everything the SDK needs
//! through two narrow traits: [`EmbedSdk`] performs the actual mount and
//! [`GuestTokenProvider`] supplies tokens on the SDK's schedule. Token
//! refresh timing is entirely the SDK's business; this crate keeps no
//! timer.

use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::http::HttpTransport;

/// Supplies guest tokens for exactly one dashboard.
///
/// The SDK calls [`guest_token`] once at mount and again whenever the
/// current token is about to expire.
///
/// [`guest_token`]: GuestTokenProvider::guest_token
#[async_trait]
pub trait GuestTokenProvider: Send + Sync {
    /// The dashboard id this provider is scoped to.
    fn dashboard_id(&self) -> &str;

    /// Produce a guest token valid for [`dashboard_id`].
    ///
    /// [`dashboard_id`]: GuestTokenProvider::dashboard_id
    async fn guest_token(&self) -> Result<String>;
}

/// Everything the SDK needs for one mount.
pub struct SdkMountRequest {
    /// External identifier of the dashboard to embed
    pub dashboard_id: String,
    /// Domain of the embedding host serving the dashboard
    pub domain: String,
    /// Token source the SDK polls on its own schedule
    pub token_provider: Arc<dyn GuestTokenProvider>,
}

impl fmt::Debug for SdkMountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkMountRequest")
            .field("dashboard_id", &self.dashboard_id)
            .field("domain", &self.domain)
            .finish()
    }
}

/// A live mount produced by the SDK.
///
/// Dropping the handle tears the mount down; implementations empty their
/// container in `Drop`.
pub trait MountHandle: Send {
    /// Identifier of the mounted dashboard.
    fn dashboard_id(&self) -> &str;
}

/// The third-party embedding SDK behind one seam.
///
/// Implement this once per host environment (webview, test double, ...).
/// A failed mount is reported as [`SdkError`] with the SDK's own message
/// when it has one; implementations must not panic across this boundary.
///
/// [`SdkError`]: crate::SimaLinkError::SdkError
#[async_trait]
pub trait EmbedSdk: Send + Sync {
    /// Mount one dashboard and return a handle that owns the mount.
    async fn mount(&self, request: SdkMountRequest) -> Result<Box<dyn MountHandle>>;
}

/// [`GuestTokenProvider`] bound to one dashboard, backed by the portal.
///
/// Created during [`mount`] and primed with the token minted there, so the
/// SDK's first fetch does not repeat the network call. Every later fetch
/// mints a fresh token scoped to the same dashboard.
///
/// [`mount`]: crate::embed::EmbedClient::mount
pub struct ScopedTokenProvider {
    dashboard_id: String,
    transport: HttpTransport,
    primed: Mutex<Option<String>>,
}

impl ScopedTokenProvider {
    pub(crate) fn new(
        dashboard_id: String,
        transport: HttpTransport,
        initial_token: String,
    ) -> Self {
        Self {
            dashboard_id,
            transport,
            primed: Mutex::new(Some(initial_token)),
        }
    }
}

impl fmt::Debug for ScopedTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTokenProvider")
            .field("dashboard_id", &self.dashboard_id)
            .finish()
    }
}

#[async_trait]
impl GuestTokenProvider for ScopedTokenProvider {
    fn dashboard_id(&self) -> &str {
        &self.dashboard_id
    }

    async fn guest_token(&self) -> Result<String> {
        if let Some(token) = self.primed.lock().await.take() {
            debug!(
                "[EMBED] Handing initially minted guest token to the SDK (dashboard {})",
                self.dashboard_id
            );
            return Ok(token);
        }

        debug!("[EMBED] SDK requested a token refresh for dashboard {}", self.dashboard_id);
        let minted = super::mint_scoped_token(&self.transport, &self.dashboard_id).await?;
        Ok(minted.token)
    }
}
