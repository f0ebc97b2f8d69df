use serde::{Deserialize, Serialize};

/// Response from the RAG chat endpoint: a match count plus a sample of the
/// supporting documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Total number of documents that matched the query
    pub matched_document_count: u64,

    /// Sample of the matched documents (at most the requested result count)
    #[serde(default)]
    pub sample_documents: Vec<SampleDocument>,
}

impl ChatResponse {
    /// One-line summary suitable as the assistant's transcript text.
    pub fn summary_text(&self) -> String {
        match self.matched_document_count {
            0 => "No matching documents were found.".to_string(),
            1 => "Found 1 matching document.".to_string(),
            n => format!("Found {} matching documents.", n),
        }
    }
}

/// A supporting document snippet returned with a chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDocument {
    /// Source document identifier
    pub id: String,

    /// Snippet of the document content
    #[serde(default)]
    pub content: String,

    /// Similarity score of the snippet against the query
    #[serde(default)]
    pub similarity: Option<f64>,

    /// Arbitrary source metadata (title, page, origin, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
