//! RAG chat client.
//!
//! One free-text query plus three tunable parameters go to the backend's
//! retrieval endpoint; back comes a match count and a sample of the
//! supporting documents. The client holds no conversation state — callers
//! keep their own [`Transcript`] and append both sides of each exchange.
//!
//! The same client also maintains the index: [`ingest_documents`] feeds new
//! documents into the knowledge base and [`set_system_prompt`] replaces the
//! prompt the backend prepends to every generation.
//!
//! [`ingest_documents`]: ChatClient::ingest_documents
//! [`set_system_prompt`]: ChatClient::set_system_prompt

pub mod transcript;

pub use transcript::{ChatTurn, Speaker, Transcript};

use log::debug;

use crate::error::{Result, SimaLinkError};
use crate::http::HttpTransport;
use crate::models::{
    ChatRequest, ChatResponse, IngestRequest, IngestResponse, MessageResponse, RagDocument,
    SystemPromptUpdate,
};

const CHAT_PATH: &str = "/api/rag/chat/";
const DOCUMENTS_PATH: &str = "/api/rag/documents/";
const SYSTEM_PROMPT_PATH: &str = "/api/rag/system-prompt/";

/// Fewest documents the backend will retrieve per query.
pub const MIN_RESULT_COUNT: u32 = 1;
/// Most documents the backend will retrieve per query.
pub const MAX_RESULT_COUNT: u32 = 20;
/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.0;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;
/// Smallest accepted output budget, in tokens.
pub const MIN_MAX_TOKENS: u32 = 100;
/// Largest accepted output budget, in tokens.
pub const MAX_MAX_TOKENS: u32 = 8192;

/// Tunable parameters for one chat query.
///
/// Defaults match the backend's own; out-of-range values are rejected
/// before any network call.
///
/// # Example
/// ```rust
/// use sima_link::ChatOptions;
///
/// let options = ChatOptions::new().with_result_count(10).with_temperature(0.7);
/// ```
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// How many matching documents to retrieve (1 to 20)
    pub result_count: u32,
    /// Sampling temperature for the generation step (0.0 to 2.0)
    pub temperature: f32,
    /// Maximum output length in tokens (100 to 8192)
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            result_count: 7,
            temperature: 0.3,
            max_tokens: 2048,
        }
    }
}

impl ChatOptions {
    /// Options with the backend's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many matching documents to retrieve.
    pub fn with_result_count(mut self, result_count: u32) -> Self {
        self.result_count = result_count;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum output length in tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Check every parameter against the backend's accepted ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESULT_COUNT..=MAX_RESULT_COUNT).contains(&self.result_count) {
            return Err(SimaLinkError::ValidationError(format!(
                "Result count must be between {} and {}.",
                MIN_RESULT_COUNT, MAX_RESULT_COUNT
            )));
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(SimaLinkError::ValidationError(format!(
                "Temperature must be between {} and {}.",
                MIN_TEMPERATURE, MAX_TEMPERATURE
            )));
        }
        if !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&self.max_tokens) {
            return Err(SimaLinkError::ValidationError(format!(
                "Max tokens must be between {} and {}.",
                MIN_MAX_TOKENS, MAX_MAX_TOKENS
            )));
        }
        Ok(())
    }
}

/// Client for the RAG chat endpoint.
#[derive(Clone)]
pub struct ChatClient {
    transport: HttpTransport,
}

impl ChatClient {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Send one query and return the match summary.
    ///
    /// The query is trimmed; an empty query and out-of-range options are
    /// rejected client-side. Every failure mode carries a display-ready
    /// message through
    /// [`display_message`](crate::SimaLinkError::display_message).
    pub async fn send_message(&self, query: &str, options: &ChatOptions) -> Result<ChatResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SimaLinkError::ValidationError("Message cannot be empty.".to_string()));
        }
        options.validate()?;

        debug!("[CHAT] Sending query (len={})", query.len());
        let request = ChatRequest {
            query: query.to_string(),
            result_count: options.result_count,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response: ChatResponse = self.transport.post_json(CHAT_PATH, &request).await?;
        debug!(
            "[CHAT] {} documents matched ({} samples returned)",
            response.matched_document_count,
            response.sample_documents.len()
        );
        Ok(response)
    }

    /// Add documents to the knowledge base.
    ///
    /// Every document needs non-blank content; ids are optional (the
    /// backend assigns one when absent) and metadata travels through
    /// untouched. An empty batch is rejected client-side, like an empty
    /// profile update: there is nothing to send.
    pub async fn ingest_documents(&self, documents: Vec<RagDocument>) -> Result<IngestResponse> {
        if documents.is_empty() {
            return Err(SimaLinkError::ValidationError("No documents to add.".to_string()));
        }
        if documents.iter().any(|doc| doc.content.trim().is_empty()) {
            return Err(SimaLinkError::ValidationError(
                "Every document needs non-empty content.".to_string(),
            ));
        }

        debug!("[CHAT] Adding {} documents to the knowledge base", documents.len());
        let request = IngestRequest { documents };
        let response: IngestResponse = self.transport.post_json(DOCUMENTS_PATH, &request).await?;
        debug!("[CHAT] Backend accepted {} documents", response.document_count);
        Ok(response)
    }

    /// Replace the system prompt the backend prepends to every generation.
    ///
    /// The prompt is trimmed and an empty prompt is rejected client-side;
    /// clearing the prompt back to the backend default is not a portal
    /// operation.
    pub async fn set_system_prompt(&self, prompt: &str) -> Result<()> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SimaLinkError::ValidationError(
                "System prompt cannot be empty.".to_string(),
            ));
        }

        let request = SystemPromptUpdate { system_prompt: prompt.to_string() };
        let ack: MessageResponse = self.transport.put_json(SYSTEM_PROMPT_PATH, &request).await?;
        debug!("[CHAT] System prompt replaced: {}", ack.message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionEvents, SessionHandle};

    fn offline_client() -> ChatClient {
        let session =
            SessionHandle::new(Box::new(MemorySessionStore::new()), SessionEvents::new());
        let transport = HttpTransport::new(
            "http://127.0.0.1:9".to_string(),
            reqwest::Client::new(),
            session,
        );
        ChatClient::new(transport)
    }

    #[test]
    fn test_default_options_match_backend_defaults() {
        let options = ChatOptions::default();
        assert_eq!(options.result_count, 7);
        assert_eq!(options.temperature, 0.3);
        assert_eq!(options.max_tokens, 2048);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_builder() {
        let options = ChatOptions::new()
            .with_result_count(10)
            .with_temperature(0.9)
            .with_max_tokens(512);

        assert_eq!(options.result_count, 10);
        assert_eq!(options.temperature, 0.9);
        assert_eq!(options.max_tokens, 512);
    }

    #[test]
    fn test_options_bounds() {
        assert!(ChatOptions::new().with_result_count(0).validate().is_err());
        assert!(ChatOptions::new().with_result_count(21).validate().is_err());
        assert!(ChatOptions::new().with_result_count(20).validate().is_ok());

        assert!(ChatOptions::new().with_temperature(-0.1).validate().is_err());
        assert!(ChatOptions::new().with_temperature(2.1).validate().is_err());
        assert!(ChatOptions::new().with_temperature(2.0).validate().is_ok());

        assert!(ChatOptions::new().with_max_tokens(99).validate().is_err());
        assert!(ChatOptions::new().with_max_tokens(8193).validate().is_err());
        assert!(ChatOptions::new().with_max_tokens(100).validate().is_ok());
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_network() {
        let client = offline_client();
        let err = client.send_message("   \n\t ", &ChatOptions::default()).await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_options_rejected_before_network() {
        let client = offline_client();
        let options = ChatOptions::new().with_temperature(5.0);
        let err = client.send_message("hello", &options).await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_batch_before_network() {
        let client = offline_client();
        let err = client.ingest_documents(Vec::new()).await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_ingest_rejects_blank_content_before_network() {
        let client = offline_client();
        let documents = vec![RagDocument::new("fine"), RagDocument::new("   \n")];
        let err = client.ingest_documents(documents).await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_empty_system_prompt_rejected_before_network() {
        let client = offline_client();
        let err = client.set_system_prompt(" \n ").await.unwrap_err();
        assert!(matches!(err, SimaLinkError::ValidationError(_)));
    }
}
