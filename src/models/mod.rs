//! Data models for the sima-link client library.
//!
//! Defines the request and response structures exchanged with the Sima
//! portal backend: authentication, embedded-dashboard catalog, guest
//! tokens, and RAG chat.

pub mod auth_response;
pub mod chat_request;
pub mod chat_response;
pub mod dashboard;
pub(crate) mod error_body;
pub mod guest_token_request;
pub mod guest_token_response;
pub mod guest_token_validation;
pub mod ingest_request;
pub mod ingest_response;
pub mod login_request;
pub mod message_response;
pub mod profile_update;
pub mod signup_request;
pub mod sync_response;
pub mod system_prompt_update;
pub mod user;


pub use auth_response::AuthResponse;
pub use chat_request::ChatRequest;
pub use chat_response::{ChatResponse, SampleDocument};
pub use dashboard::{DashboardDraft, DashboardRecord};
pub use guest_token_request::{EmbedResource, GuestTokenRequest, RlsRule};
pub use guest_token_response::GuestTokenResponse;
pub use guest_token_validation::{GuestTokenInfo, GuestTokenValidation};
pub use ingest_request::{IngestRequest, RagDocument};
pub use ingest_response::IngestResponse;
pub use login_request::LoginRequest;
pub use message_response::MessageResponse;
pub use profile_update::ProfileUpdate;
pub use signup_request::SignupRequest;
pub use sync_response::SyncResponse;
pub use system_prompt_update::SystemPromptUpdate;
pub use user::User;
