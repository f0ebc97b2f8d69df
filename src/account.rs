//! Account operations: sign-in, sign-up, sign-out, profile.
//!
//! All state changes flow through the shared [`SessionHandle`]: a login or
//! signup drives the `Anonymous -> Authenticating -> Authenticated`
//! transitions, logout and 401 tear the session down. Input is validated
//! client-side first, so malformed credentials never leave the process.

use log::{debug, warn};

use crate::error::{Result, SimaLinkError};
use crate::http::HttpTransport;
use crate::models::{AuthResponse, LoginRequest, MessageResponse, ProfileUpdate, SignupRequest, User};
use crate::session::{Session, SessionHandle, SessionState};
use crate::validation::{validate_login, validate_signup};

const LOGIN_PATH: &str = "/api/auth/login/";
const SIGNUP_PATH: &str = "/api/auth/signup/";
const LOGOUT_PATH: &str = "/api/auth/logout/";
const PROFILE_PATH: &str = "/api/auth/profile/";

/// Client for the portal's authentication and profile endpoints.
#[derive(Clone)]
pub struct AccountClient {
    transport: HttpTransport,
}

impl AccountClient {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    fn session(&self) -> &SessionHandle {
        self.transport.session()
    }

    /// Sign in with phone and password.
    ///
    /// On success the session is installed and persisted, and subsequent
    /// requests carry its bearer token. On failure the state settles back
    /// to anonymous and the error carries a display-ready message. A 401
    /// here means wrong credentials; it does not touch any stored session.
    ///
    /// If the session is torn down while the request is in flight (a
    /// concurrent [`clear`]), the accepted credentials are returned but the
    /// handle stays signed out.
    ///
    /// [`clear`]: SessionHandle::clear
    pub async fn login(&self, phone: &str, password: &str) -> Result<Session> {
        let report = validate_login(phone, password);
        if !report.valid() {
            return Err(SimaLinkError::ValidationError(report.summary()));
        }

        let epoch = self.session().begin_authenticating()?;
        debug!("[AUTH] Login requested");

        let request = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = match self.transport.post_json(LOGIN_PATH, &request).await {
            Ok(response) => response,
            Err(e) => {
                self.session().fail_authenticating()?;
                return Err(e);
            },
        };

        self.install_session(epoch, response)
    }

    /// Register a new account. A successful signup is immediately a live
    /// session, exactly like a login.
    pub async fn signup(&self, request: SignupRequest) -> Result<Session> {
        let report = validate_signup(&request);
        if !report.valid() {
            return Err(SimaLinkError::ValidationError(report.summary()));
        }

        let epoch = self.session().begin_authenticating()?;
        debug!("[AUTH] Signup requested");

        let response: AuthResponse = match self.transport.post_json(SIGNUP_PATH, &request).await {
            Ok(response) => response,
            Err(e) => {
                self.session().fail_authenticating()?;
                return Err(e);
            },
        };

        self.install_session(epoch, response)
    }

    fn install_session(&self, epoch: u64, response: AuthResponse) -> Result<Session> {
        let session = Session {
            user: response.user,
            token: response.token,
            refresh_token: response.refresh_token,
        };
        let installed = self.session().complete_login(epoch, session.clone())?;
        if installed {
            debug!("[AUTH] Signed in as user id {}", session.user.id);
        } else {
            warn!("[AUTH] Session was reset while signing in; result discarded");
        }
        Ok(session)
    }

    /// Sign out.
    ///
    /// Local teardown happens first and always succeeds, even with the
    /// server unreachable. The backend call is a best-effort farewell sent
    /// with the token the session held; a failure, including a 401 for a
    /// token the backend already dropped, is only logged. An explicit
    /// sign-out never fires the session-expired event. No-op when already
    /// signed out.
    pub async fn logout(&self) -> Result<()> {
        let session = match self.session().state()? {
            SessionState::Authenticated(session) => session,
            _ => {
                debug!("[AUTH] Logout requested without a session, nothing to do");
                return Ok(());
            },
        };

        self.session().clear()?;
        debug!("[AUTH] Signed out");

        match self
            .transport
            .post_no_body_with_bearer::<MessageResponse>(LOGOUT_PATH, &session.token)
            .await
        {
            Ok(ack) => debug!("[AUTH] Backend acknowledged logout: {}", ack.message),
            Err(e) => warn!("[AUTH] Logout request failed (already signed out locally): {}", e),
        }

        Ok(())
    }

    /// Fetch the current user's profile from the backend.
    ///
    /// The fetched record also refreshes the user stored in the session,
    /// unless the session was torn down while the request was in flight,
    /// in which case the session is left alone.
    pub async fn profile(&self) -> Result<User> {
        self.session().require_session()?;
        let epoch = self.session().epoch();

        let user: User = self.transport.get_json(PROFILE_PATH).await?;

        if !self.session().apply_user_if_current(epoch, user.clone())? {
            debug!("[AUTH] Profile result not applied (session changed mid-flight)");
        }
        Ok(user)
    }

    /// Update profile fields. Only the fields set on `update` are sent.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(SimaLinkError::ValidationError("Nothing to update.".to_string()));
        }
        self.session().require_session()?;
        let epoch = self.session().epoch();

        let user: User = self.transport.put_json(PROFILE_PATH, &update).await?;

        if !self.session().apply_user_if_current(epoch, user.clone())? {
            debug!("[AUTH] Profile update not applied (session changed mid-flight)");
        }
        Ok(user)
    }
}
