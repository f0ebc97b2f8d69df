//! # sima-link: Sima Portal Client Library
//!
//! Client library for the Sima analytics portal. Wraps the portal's REST
//! backend behind typed sub-clients for authentication, the embedded
//! dashboard catalog, guest-token dashboard embedding, and RAG chat.
//!
//! ## Features
//!
//! - **Session Management**: Phone + password sign-in with a shared session
//!   state machine; any HTTP 401 signs the whole client out at once
//! - **Dashboard Catalog**: List, create, update, delete and sync the
//!   dashboards registered with the portal
//! - **Dashboard Embedding**: Mint short-lived guest tokens scoped to one
//!   dashboard and drive an embedding SDK through its mount lifecycle
//! - **RAG Chat**: Ask free-text questions against the document index,
//!   feed new documents into it, and manage its system prompt
//! - **Pluggable Persistence**: Keep sessions in memory or on disk
//! - **No Hidden Retries**: Every request is attempted exactly once and
//!   failures carry display-ready messages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sima_link::{ChatOptions, SimaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build a client with custom configuration
//!     let client = SimaClient::builder()
//!         .base_url("http://localhost:8000")
//!         .timeout(std::time::Duration::from_secs(30))
//!         .build()?;
//!
//!     // Sign in; the session lives inside the client
//!     client.account().login("+15551234567", "hunter2hunter2").await?;
//!
//!     // Browse the dashboard catalog
//!     let dashboards = client.catalog().list_dashboards().await?;
//!     println!("{} dashboards available", dashboards.len());
//!
//!     // Ask the data a question
//!     let reply = client
//!         .chat()
//!         .send_message("top regions by revenue", &ChatOptions::default())
//!         .await?;
//!     println!("{}", reply.summary_text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding a Dashboard
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sima_link::{EmbedContainer, EmbedSdk, MountEvents, SimaClient};
//!
//! # async fn example(sdk: Arc<dyn EmbedSdk>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = SimaClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//! let embed = client.embed(sdk);
//!
//! let mut container = EmbedContainer::new();
//! let events = MountEvents::new()
//!     .on_load(|| println!("Dashboard is visible"))
//!     .on_error(|message| eprintln!("{}", message));
//! embed
//!     .mount("4f6f188e-1b26-4d72-9d54-8347efdbc98a", &mut container, &events)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Staying Signed In
//!
//! ```rust,no_run
//! use sima_link::{session::FileSessionStore, SessionEvents, SimaClient};
//!
//! # fn example() -> sima_link::Result<()> {
//! let client = SimaClient::builder()
//!     .base_url("http://localhost:8000")
//!     .session_store(FileSessionStore::new()?)
//!     .session_events(SessionEvents::new().on_session_expired(|| {
//!         println!("Session expired, please sign in again.");
//!     }))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod chat;
pub mod client;
pub mod embed;
pub mod error;
pub mod models;
pub mod session;
pub mod timeouts;
pub mod validation;

mod http;

// Re-export main types for convenience
pub use account::AccountClient;
pub use chat::{ChatClient, ChatOptions, ChatTurn, Speaker, Transcript};
pub use client::{SimaClient, SimaClientBuilder};
pub use embed::{
    CatalogClient, EmbedClient, EmbedContainer, EmbedSdk, GuestTokenProvider, MountEvents,
    MountHandle, ScopedTokenProvider, SdkMountRequest,
};
pub use error::{Result, SimaLinkError};
pub use models::{
    AuthResponse, ChatRequest, ChatResponse, DashboardDraft, DashboardRecord, GuestTokenRequest,
    GuestTokenResponse, GuestTokenValidation, IngestResponse, ProfileUpdate, RagDocument,
    SampleDocument, SignupRequest, SyncResponse, User,
};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionEvents, SessionHandle, SessionState,
    SessionStore, StoredSession,
};
pub use timeouts::SimaTimeouts;
pub use validation::ValidationReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
