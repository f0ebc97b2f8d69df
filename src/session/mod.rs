//! Auth session state machine shared across the client.
//!
//! One [`SessionHandle`] is created per client and cloned into every
//! sub-client. It owns three things:
//!
//! - the session **state**: `Anonymous`, `Authenticating`, or
//!   `Authenticated` with the signed-in user and bearer token;
//! - the **epoch**, a counter bumped on every teardown while the state
//!   write lock is held. Async results capture the epoch when they start
//!   and are applied only if it is still current, checked under that same
//!   lock, so a response landing after a logout cannot resurrect state;
//! - the pluggable [`SessionStore`] that persists the session across
//!   process restarts.
//!
//! The handle never inspects token contents. A token is assumed valid until
//! the backend answers 401, at which point [`handle_unauthorized`]
//! (wired into the transport) tears the session down globally and fires
//! [`SessionEvents::on_session_expired`]. A 401 carrying an epoch older
//! than the last teardown belongs to a session already gone and is ignored.
//!
//! [`handle_unauthorized`]: SessionHandle::handle_unauthorized

pub mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};

use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{Result, SimaLinkError};
use crate::models::User;

/// A live authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The signed-in user
    pub user: User,
    /// Bearer token attached to every authenticated request
    pub token: String,
    /// Refresh token, if the backend issued one
    pub refresh_token: Option<String>,
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            user: stored.user,
            token: stored.token,
            refresh_token: stored.refresh_token,
        }
    }
}

impl Session {
    fn to_stored(&self) -> StoredSession {
        StoredSession {
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            user: self.user.clone(),
        }
    }
}

/// Where the session currently is in its lifecycle.
///
/// Transitions: `Anonymous -> Authenticating` when a login or signup call
/// starts; `Authenticating -> Authenticated` on success and back to
/// `Anonymous` on failure; `Authenticated -> Anonymous` on logout or on any
/// backend 401.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No session; only public endpoints are reachable.
    Anonymous,
    /// A login or signup call is in flight.
    Authenticating,
    /// Signed in; the token is attached to every request.
    Authenticated(Session),
}

impl SessionState {
    /// True when a session is established.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

/// Type alias for the on_session_expired callback.
pub type OnSessionExpiredCallback = Arc<dyn Fn() + Send + Sync>;

/// Session lifecycle event handlers.
///
/// All handlers are optional and `Send + Sync` so they work with the async
/// tokio runtime.
#[derive(Clone, Default)]
pub struct SessionEvents {
    /// Called when a 401 forces the session down. This is the hook a UI
    /// uses to navigate back to its login screen, from any screen.
    pub(crate) on_session_expired: Option<OnSessionExpiredCallback>,
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents")
            .field("on_session_expired", &self.on_session_expired.is_some())
            .finish()
    }
}

impl SessionEvents {
    /// Create a new empty `SessionEvents` (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked when a 401 tears the session down.
    ///
    /// Not invoked on explicit logout, and not invoked when a login attempt
    /// fails with 401 (there was no session to lose).
    ///
    /// # Example
    /// ```rust
    /// use sima_link::SessionEvents;
    ///
    /// let events = SessionEvents::new()
    ///     .on_session_expired(|| println!("Session expired, back to login"));
    /// ```
    pub fn on_session_expired(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(f));
        self
    }

    /// Returns `true` if any handler is registered.
    pub fn has_any(&self) -> bool {
        self.on_session_expired.is_some()
    }

    /// Dispatch the on_session_expired event.
    pub(crate) fn emit_session_expired(&self) {
        if let Some(cb) = &self.on_session_expired {
            cb();
        }
    }
}

struct SessionInner {
    state: RwLock<SessionState>,
    epoch: AtomicU64,
    store: Mutex<Box<dyn SessionStore>>,
    events: SessionEvents,
}

/// Cheap-clone shared handle to the session state machine.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_name = self.state().map(|s| s.name()).unwrap_or("unknown");
        f.debug_struct("SessionHandle")
            .field("state", &state_name)
            .field("epoch", &self.epoch())
            .finish()
    }
}

impl SessionHandle {
    /// Create a handle, restoring any persisted session from the store.
    ///
    /// A stored token means the process starts `Authenticated`; the token
    /// is trusted until the backend says otherwise. A store that cannot be
    /// read degrades to `Anonymous` with a warning rather than failing
    /// client construction.
    pub(crate) fn new(store: Box<dyn SessionStore>, events: SessionEvents) -> Self {
        let initial = match store.load() {
            Ok(Some(stored)) => {
                debug!("[SESSION] Restored persisted session for user id {}", stored.user.id);
                SessionState::Authenticated(Session::from(stored))
            },
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("[SESSION] Could not restore persisted session: {}", e);
                SessionState::Anonymous
            },
        };

        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(initial),
                epoch: AtomicU64::new(0),
                store: Mutex::new(store),
                events,
            }),
        }
    }

    // ---------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------

    /// Current state (cloned snapshot).
    pub fn state(&self) -> Result<SessionState> {
        Ok(self.read_state()?.clone())
    }

    /// True when a session is established.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), Ok(state) if state.is_authenticated())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        match self.state() {
            Ok(SessionState::Authenticated(session)) => Some(session.user),
            _ => None,
        }
    }

    /// Bearer token to attach to outgoing requests, if a session exists.
    pub fn bearer_token(&self) -> Result<Option<String>> {
        Ok(match &*self.read_state()? {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        })
    }

    /// Bearer token plus the epoch it was read under, as one consistent
    /// snapshot. Epoch bumps happen under the state write lock, so holding
    /// the read lock across both reads pins them together.
    pub(crate) fn bearer_snapshot(&self) -> Result<(Option<String>, u64)> {
        let state = self.read_state()?;
        let token = match &*state {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        };
        Ok((token, self.epoch()))
    }

    /// Current epoch. Captured before an async call, compared after.
    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// The session, or `Unauthorized` when there is none.
    ///
    /// This is the guard for operations that only make sense signed in.
    pub fn require_session(&self) -> Result<Session> {
        match &*self.read_state()? {
            SessionState::Authenticated(session) => Ok(session.clone()),
            _ => Err(SimaLinkError::Unauthorized("Sign in to continue.".to_string())),
        }
    }

    // ---------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------

    /// `Anonymous -> Authenticating`. Returns the epoch captured at the
    /// start of the attempt, to be passed to [`complete_login`].
    ///
    /// Rejects when a session already exists or another attempt is in
    /// flight; the portal has no defined transition for either.
    ///
    /// [`complete_login`]: SessionHandle::complete_login
    pub fn begin_authenticating(&self) -> Result<u64> {
        let mut state = self.write_state()?;
        match &*state {
            SessionState::Anonymous => {
                debug!("[SESSION] State: anonymous -> authenticating");
                *state = SessionState::Authenticating;
                Ok(self.epoch())
            },
            SessionState::Authenticating => Err(SimaLinkError::ValidationError(
                "A sign-in attempt is already in progress.".to_string(),
            )),
            SessionState::Authenticated(_) => Err(SimaLinkError::ValidationError(
                "Already signed in. Sign out first.".to_string(),
            )),
        }
    }

    /// `Authenticating -> Authenticated`, persisting the session.
    ///
    /// The session installs only while the state is still `Authenticating`
    /// and the epoch has not moved, both checked under the write lock. If a
    /// teardown raced the login, the result is discarded and an
    /// `Authenticating` state is settled back to `Anonymous`. Returns
    /// whether the session was installed.
    pub fn complete_login(&self, epoch: u64, session: Session) -> Result<bool> {
        {
            let mut state = self.write_state()?;
            if self.epoch() != epoch || *state != SessionState::Authenticating {
                debug!("[SESSION] Discarding login result from a stale attempt");
                if *state == SessionState::Authenticating {
                    *state = SessionState::Anonymous;
                }
                return Ok(false);
            }
            debug!(
                "[SESSION] State: authenticating -> authenticated (user id {})",
                session.user.id
            );
            *state = SessionState::Authenticated(session.clone());
        }
        self.persist(&session);
        Ok(true)
    }

    /// `Authenticating -> Anonymous` after a failed attempt. No-op in any
    /// other state.
    pub fn fail_authenticating(&self) -> Result<()> {
        let mut state = self.write_state()?;
        if *state == SessionState::Authenticating {
            debug!("[SESSION] State: authenticating -> anonymous (attempt failed)");
            *state = SessionState::Anonymous;
        }
        Ok(())
    }

    /// Tear down to `Anonymous` from any state: bump the epoch, clear the
    /// store. Store failures are logged and swallowed so local teardown
    /// always succeeds.
    ///
    /// The epoch moves inside the state critical section; a racing
    /// [`complete_login`] checks it under the same lock and so can never
    /// install past a finished teardown.
    ///
    /// [`complete_login`]: SessionHandle::complete_login
    pub fn clear(&self) -> Result<()> {
        {
            let mut state = self.write_state()?;
            debug!("[SESSION] State: {} -> anonymous (cleared)", state.name());
            *state = SessionState::Anonymous;
            self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        }
        self.clear_store();
        Ok(())
    }

    /// Global 401 interceptor hook, called by the transport for every 401
    /// response no matter which operation produced it.
    ///
    /// `epoch` is the epoch the rejected request read its token under. When
    /// it is no longer current the 401 came from a session already torn
    /// down, and whatever session is live now is left alone.
    ///
    /// Tears the session down only when one exists: a 401 on a login
    /// attempt is just a failed login, not an expiry, and must not wipe
    /// state or fire events. Returns whether a teardown happened.
    pub fn handle_unauthorized(&self, epoch: u64) -> Result<bool> {
        {
            let mut state = self.write_state()?;
            if self.epoch() != epoch {
                debug!("[SESSION] Ignoring a 401 from before the last teardown");
                return Ok(false);
            }
            match &*state {
                SessionState::Authenticated(_) => {
                    warn!("[SESSION] 401 received on an authenticated session, tearing down");
                    *state = SessionState::Anonymous;
                    self.inner.epoch.fetch_add(1, Ordering::SeqCst);
                },
                _ => return Ok(false),
            }
        }
        self.clear_store();
        self.inner.events.emit_session_expired();
        Ok(true)
    }

    /// Apply a freshly fetched user record to the authenticated session,
    /// unless the epoch moved while the fetch was in flight. Returns
    /// whether the update was applied.
    pub fn apply_user_if_current(&self, epoch: u64, user: User) -> Result<bool> {
        let updated = {
            let mut state = self.write_state()?;
            if self.epoch() != epoch {
                debug!("[SESSION] Discarding stale user record (epoch moved)");
                return Ok(false);
            }
            match &mut *state {
                SessionState::Authenticated(session) => {
                    session.user = user;
                    Some(session.clone())
                },
                _ => None,
            }
        };

        match updated {
            Some(session) => {
                self.persist(&session);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    // ---------------------------------------------------------------
    // Store plumbing
    // ---------------------------------------------------------------

    /// Persist the session, best effort. The in-memory session stays live
    /// even when the disk write fails.
    fn persist(&self, session: &Session) {
        match self.inner.store.lock() {
            Ok(mut store) => {
                if let Err(e) = store.save(&session.to_stored()) {
                    warn!("[SESSION] Could not persist session: {}", e);
                }
            },
            Err(e) => warn!("[SESSION] Session store lock poisoned: {}", e),
        }
    }

    fn clear_store(&self) {
        match self.inner.store.lock() {
            Ok(mut store) => {
                if let Err(e) = store.clear() {
                    warn!("[SESSION] Could not clear persisted session: {}", e);
                }
            },
            Err(e) => warn!("[SESSION] Session store lock poisoned: {}", e),
        }
    }

    fn read_state(&self) -> Result<std::sync::RwLockReadGuard<'_, SessionState>> {
        self.inner.state.read().map_err(|e| SimaLinkError::InternalError(e.to_string()))
    }

    fn write_state(&self) -> Result<std::sync::RwLockWriteGuard<'_, SessionState>> {
        self.inner.state.write().map_err(|e| SimaLinkError::InternalError(e.to_string()))
    }
}
