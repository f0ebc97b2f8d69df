use serde::{Deserialize, Serialize};

/// Result of the guest-token validation lookup.
///
/// This is a debugging aid: it checks the backend's own record of the
/// token, not the embedding host's opinion of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestTokenValidation {
    /// Whether the backend still considers the token valid
    pub valid: bool,
    /// Stored token record, present only when valid
    #[serde(default)]
    pub token_info: Option<GuestTokenInfo>,
}

/// Stored guest-token record as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestTokenInfo {
    /// The token string
    pub token: String,
    /// Dashboard the token was minted for
    #[serde(default)]
    pub dashboard_uuid: Option<String>,
    /// Expiry time in RFC3339 format
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Mint time in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}
