use serde::{Deserialize, Serialize};

/// Request body for adding documents to the RAG knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Documents to add, in order
    pub documents: Vec<RagDocument>,
}

/// One document headed for the knowledge base.
///
/// # Example
/// ```rust
/// use sima_link::RagDocument;
///
/// let doc = RagDocument::new("Quarterly revenue grew 12%.")
///     .with_id("q3-report")
///     .with_metadata(serde_json::json!({ "source": "finance" }));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagDocument {
    /// Caller-chosen identifier; the backend assigns one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Document text to index
    pub content: String,

    /// Arbitrary metadata stored alongside the document (title, origin, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl RagDocument {
    /// Create a document with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            metadata: None,
        }
    }

    /// Attach a caller-chosen identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach metadata stored alongside the document.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
