use serde::{Deserialize, Serialize};

/// Short-lived guest token minted by the backend for one dashboard.
///
/// Never persisted by the client; the embedding SDK consumes it and asks
/// for a fresh one through its refresh callback when this one nears expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestTokenResponse {
    /// Opaque token string handed to the embedding SDK
    pub token: String,
    /// External dashboard identifier the token is scoped to
    pub dashboard_uuid: String,
    /// Domain of the embedding host the dashboard is served from
    pub domain: String,
}
