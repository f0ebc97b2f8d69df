use serde::{Deserialize, Serialize};

/// Response of the catalog sync operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Human-readable acknowledgement
    #[serde(default)]
    pub message: String,
    /// Number of catalog entries reconciled
    #[serde(default)]
    pub count: u64,
}
