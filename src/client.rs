//! Main portal client with builder pattern.
//!
//! Provides the entry point for talking to a Sima portal backend: one
//! configured [`SimaClient`] hands out the per-area sub-clients, all of
//! which share a single HTTP connection pool and a single session.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    account::AccountClient,
    chat::ChatClient,
    embed::{CatalogClient, EmbedClient, EmbedSdk},
    error::{Result, SimaLinkError},
    http::HttpTransport,
    session::{MemorySessionStore, SessionEvents, SessionHandle, SessionStore},
    timeouts::SimaTimeouts,
};

/// Main portal client.
///
/// Use [`SimaClientBuilder`] to construct instances with custom
/// configuration. The client is cheap to clone; every clone shares the
/// same session, so a sign-in (or a 401 teardown) in one place is visible
/// everywhere.
///
/// # Examples
///
/// ```rust,no_run
/// use sima_link::SimaClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SimaClient::builder()
///     .base_url("http://localhost:8000")
///     .timeout(std::time::Duration::from_secs(30))
///     .build()?;
///
/// let session = client.account().login("+15551234567", "hunter2hunter2").await?;
/// println!("Signed in as {}", session.user.display_name());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SimaClient {
    base_url: String,
    transport: HttpTransport,
    timeouts: SimaTimeouts,
}

impl SimaClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> SimaClientBuilder {
        SimaClientBuilder::new()
    }

    /// Sign-in, sign-up, sign-out and profile operations.
    pub fn account(&self) -> AccountClient {
        AccountClient::new(self.transport.clone())
    }

    /// Dashboard catalog operations (list, CRUD, sync, token validation).
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(self.transport.clone())
    }

    /// RAG chat operations.
    pub fn chat(&self) -> ChatClient {
        ChatClient::new(self.transport.clone())
    }

    /// Embedding operations, mounted through the given SDK.
    ///
    /// The SDK is whatever renders dashboards in the host surface; tests
    /// pass a fake, applications pass an adapter over the real embedding
    /// runtime.
    pub fn embed(&self, sdk: Arc<dyn EmbedSdk>) -> EmbedClient {
        EmbedClient::new(self.transport.clone(), sdk)
    }

    /// The shared session handle.
    ///
    /// Useful for observing authentication state or signing out without
    /// going through [`AccountClient`].
    pub fn session(&self) -> &SessionHandle {
        self.transport.session()
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &SimaTimeouts {
        &self.timeouts
    }

    /// The portal base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for configuring [`SimaClient`] instances.
pub struct SimaClientBuilder {
    base_url: Option<String>,
    timeouts: SimaTimeouts,
    store: Option<Box<dyn SessionStore>>,
    events: SessionEvents,
}

impl SimaClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeouts: SimaTimeouts::default(),
            store: None,
            events: SessionEvents::new(),
        }
    }

    /// Set the base URL for the portal backend
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout (for HTTP requests)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set comprehensive timeout configuration for all operations
    ///
    /// This overrides individual timeout settings like `timeout()`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sima_link::{SimaClient, SimaTimeouts};
    ///
    /// # fn example() -> sima_link::Result<()> {
    /// let client = SimaClient::builder()
    ///     .base_url("http://localhost:8000")
    ///     .timeouts(SimaTimeouts::fast())
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn timeouts(mut self, timeouts: SimaTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the session store used to persist sign-ins across restarts
    ///
    /// Defaults to an in-memory store that forgets the session when the
    /// process exits. Pass a
    /// [`FileSessionStore`](crate::session::FileSessionStore) to keep
    /// users signed in.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sima_link::{SimaClient, session::FileSessionStore};
    ///
    /// # fn example() -> sima_link::Result<()> {
    /// let client = SimaClient::builder()
    ///     .base_url("http://localhost:8000")
    ///     .session_store(FileSessionStore::new()?)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn session_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Set callbacks for session lifecycle events
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sima_link::{SessionEvents, SimaClient};
    ///
    /// # fn example() -> sima_link::Result<()> {
    /// let client = SimaClient::builder()
    ///     .base_url("http://localhost:8000")
    ///     .session_events(SessionEvents::new().on_session_expired(|| {
    ///         println!("Signed out: the backend rejected the session.");
    ///     }))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn session_events(mut self, events: SessionEvents) -> Self {
        self.events = events;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SimaClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| SimaLinkError::ConfigurationError("base_url is required".into()))?;
        // Endpoint paths supply their own leading slash.
        let base_url = base_url.trim_end_matches('/').to_string();

        // Build HTTP client with connection pooling: one pool serves the
        // auth, catalog, embed and chat sub-clients alike.
        let http_client = reqwest::Client::builder()
            .timeout(self.timeouts.request_timeout)
            .connect_timeout(self.timeouts.connect_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SimaLinkError::ConfigurationError(e.to_string()))?;

        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemorySessionStore::new()));
        let session = SessionHandle::new(store, self.events);
        let transport = HttpTransport::new(base_url.clone(), http_client, session);

        Ok(SimaClient {
            base_url,
            transport,
            timeouts: self.timeouts,
        })
    }
}
