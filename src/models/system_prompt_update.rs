use serde::{Deserialize, Serialize};

/// Request body for replacing the RAG system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPromptUpdate {
    /// The new prompt, verbatim
    pub system_prompt: String,
}
