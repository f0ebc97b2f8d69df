//! Dashboard catalog client.
//!
//! The catalog is the backend's allow-list of embeddable dashboards. The
//! client holds no cache: every call re-fetches, so a screen visit always
//! shows the backend's current state.

use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::http::HttpTransport;
use crate::models::{
    DashboardDraft, DashboardRecord, GuestTokenValidation, SyncResponse,
};

const DASHBOARDS_PATH: &str = "/api/embed/dashboards/";
const SYNC_PATH: &str = "/api/embed/sync/";

fn dashboard_path(id: i64) -> String {
    format!("/api/embed/dashboards/{}/", id)
}

fn dashboard_info_path(host_dashboard_id: i64) -> String {
    format!("/api/embed/dashboard/{}/", host_dashboard_id)
}

fn validate_token_path(token: &str) -> String {
    format!("/api/embed/guest-token/{}/validate/", token)
}

/// Client for the dashboard catalog endpoints. All of them require a
/// signed-in session.
#[derive(Clone)]
pub struct CatalogClient {
    transport: HttpTransport,
}

impl CatalogClient {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// List every dashboard the backend allow-lists for embedding.
    pub async fn list_dashboards(&self) -> Result<Vec<DashboardRecord>> {
        self.transport.session().require_session()?;
        let records: Vec<DashboardRecord> = self.transport.get_json(DASHBOARDS_PATH).await?;
        debug!("[CATALOG] Fetched {} dashboards", records.len());
        Ok(records)
    }

    /// Fetch one catalog record by its internal id.
    pub async fn dashboard(&self, id: i64) -> Result<DashboardRecord> {
        self.transport.session().require_session()?;
        self.transport.get_json(&dashboard_path(id)).await
    }

    /// Create a catalog record (administrative).
    pub async fn create_dashboard(&self, draft: &DashboardDraft) -> Result<DashboardRecord> {
        self.transport.session().require_session()?;
        debug!("[CATALOG] Creating dashboard \"{}\"", draft.name);
        self.transport.post_json(DASHBOARDS_PATH, draft).await
    }

    /// Replace a catalog record (administrative).
    pub async fn update_dashboard(
        &self,
        id: i64,
        draft: &DashboardDraft,
    ) -> Result<DashboardRecord> {
        self.transport.session().require_session()?;
        debug!("[CATALOG] Updating dashboard {}", id);
        self.transport.put_json(&dashboard_path(id), draft).await
    }

    /// Delete a catalog record (administrative).
    pub async fn delete_dashboard(&self, id: i64) -> Result<()> {
        self.transport.session().require_session()?;
        debug!("[CATALOG] Deleting dashboard {}", id);
        self.transport.delete(&dashboard_path(id)).await
    }

    /// Ask the backend to reconcile the catalog against its configured
    /// dashboard list. Returns how many records the sync touched.
    pub async fn sync_dashboards(&self) -> Result<SyncResponse> {
        self.transport.session().require_session()?;
        let response: SyncResponse = self.transport.post_no_body(SYNC_PATH).await?;
        debug!("[CATALOG] Sync touched {} dashboards: {}", response.count, response.message);
        Ok(response)
    }

    /// Fetch the embedding host's own metadata for a dashboard, by the
    /// host's numeric id. The shape is host-defined; it is passed through
    /// untyped.
    pub async fn dashboard_info(&self, host_dashboard_id: i64) -> Result<Value> {
        self.transport.session().require_session()?;
        self.transport.get_json(&dashboard_info_path(host_dashboard_id)).await
    }

    /// Look up whether a previously minted guest token is still valid.
    /// Intended for diagnostics; the embedding flow never needs it.
    pub async fn validate_guest_token(&self, token: &str) -> Result<GuestTokenValidation> {
        self.transport.session().require_session()?;
        debug!("[CATALOG] Validating a guest token");
        self.transport.get_json(&validate_token_path(token)).await
    }
}
