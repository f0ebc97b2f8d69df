use serde::{Deserialize, Serialize};

/// Generic acknowledgement body (`{"message": "..."}`), used by logout and
/// other fire-and-forget endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement
    #[serde(default)]
    pub message: String,
}
