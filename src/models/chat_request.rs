use serde::{Deserialize, Serialize};

/// Chat request body sent to the RAG endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text user query
    pub query: String,
    /// How many matching documents to retrieve
    pub result_count: u32,
    /// Sampling temperature for the generation step
    pub temperature: f32,
    /// Maximum output length in tokens
    pub max_tokens: u32,
}
