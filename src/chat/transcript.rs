//! Client-side chat history.
//!
//! The backend answers one query at a time and remembers nothing, so the
//! conversation lives here. A [`Transcript`] is append-only: every
//! exchange adds the user's turn and the assistant's turn, in that order,
//! and nothing is ever rewritten.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::models::{ChatResponse, SampleDocument};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Locally generated id, unique within the process.
    pub id: String,
    pub speaker: Speaker,
    pub text: String,
    /// RFC 3339 timestamp taken when the turn was recorded.
    pub timestamp: String,
    /// Supporting documents; empty for user turns.
    #[serde(default)]
    pub sources: Vec<SampleDocument>,
}

impl ChatTurn {
    fn new(speaker: Speaker, text: String, sources: Vec<SampleDocument>) -> Self {
        Self {
            id: next_turn_id(),
            speaker,
            text,
            timestamp: chrono::Utc::now().to_rfc3339(),
            sources,
        }
    }
}

// Nanos alone can collide when the platform clock is coarse.
fn next_turn_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let since_the_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "turn_{}_{}",
        since_the_epoch.as_nanos(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Append-only record of a conversation.
///
/// # Example
/// ```rust,no_run
/// # async fn example(client: sima_link::SimaClient) -> Result<(), sima_link::SimaLinkError> {
/// use sima_link::{ChatOptions, Transcript};
///
/// let mut transcript = Transcript::new();
/// let response = client.chat().send_message("revenue by region", &ChatOptions::default()).await?;
/// transcript.record_exchange("revenue by region", &response);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// An empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange: the user's query, then the
    /// assistant's reply built from the response summary and its sample
    /// documents.
    pub fn record_exchange(&mut self, query: &str, response: &ChatResponse) {
        self.turns
            .push(ChatTurn::new(Speaker::User, query.to_string(), Vec::new()));
        self.turns.push(ChatTurn::new(
            Speaker::Assistant,
            response.summary_text(),
            response.sample_documents.clone(),
        ));
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
