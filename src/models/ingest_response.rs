use serde::{Deserialize, Serialize};

/// Acknowledgement for a document ingestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Human-readable confirmation
    pub message: String,

    /// How many documents the backend accepted
    pub document_count: u64,
}
