//! Error types for the sima-link client library.
//!
//! Every operation in this crate returns [`Result`]. The error taxonomy
//! follows the portal's contract: transport failures where no response was
//! received, backend-rejected requests carrying a human-readable message,
//! and client-side input errors that are surfaced before any network call.

use thiserror::Error;

/// Result type for sima-link operations.
pub type Result<T> = std::result::Result<T, SimaLinkError>;

/// Errors that can occur when talking to the Sima portal backend.
#[derive(Debug, Error)]
pub enum SimaLinkError {
    /// Client construction or configuration problem (e.g. missing base_url).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Transport-level failure: the request never produced a response.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The backend answered with a non-success status and (optionally) a
    /// message extracted from its error body.
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code returned by the backend
        status_code: u16,
        /// Human-readable error message
        message: String,
    },

    /// HTTP 401 from any endpoint. When it arrives on an authenticated
    /// session the session has already been torn down by the time the
    /// caller sees this error.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Input rejected client-side before reaching the network layer.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The embedding SDK failed to mount a dashboard.
    #[error("Embed SDK error: {0}")]
    SdkError(String),

    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Broken invariant, e.g. a poisoned lock or a token minted for the
    /// wrong dashboard.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl SimaLinkError {
    /// A display-ready message for end users.
    ///
    /// Backend-supplied messages are preferred; transport failures collapse
    /// to a generic "could not reach the server" line. Never a stack trace.
    pub fn display_message(&self) -> String {
        match self {
            Self::NetworkError(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            },
            Self::ServerError { message, status_code } => {
                if message.is_empty() {
                    format!("The server rejected the request (status {}).", status_code)
                } else {
                    message.clone()
                }
            },
            Self::Unauthorized(message) => {
                if message.is_empty() {
                    "Your session has expired. Please sign in again.".to_string()
                } else {
                    message.clone()
                }
            },
            Self::SdkError(message) => {
                if message.is_empty() {
                    "Failed to embed the dashboard.".to_string()
                } else {
                    message.clone()
                }
            },
            Self::ValidationError(message) | Self::ConfigurationError(message) => message.clone(),
            Self::SerializationError(_) => {
                "The server sent an unexpected response.".to_string()
            },
            Self::InternalError(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// True for errors produced by an HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for SimaLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SimaLinkError::SerializationError(err.to_string())
        } else {
            SimaLinkError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SimaLinkError {
    fn from(err: serde_json::Error) -> Self {
        SimaLinkError::SerializationError(err.to_string())
    }
}
