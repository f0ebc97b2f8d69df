use serde::{Deserialize, Serialize};

/// Registration request body.
///
/// On success the backend answers with the same shape as a login, so a new
/// account is immediately an active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Phone number (unique login identifier)
    pub phone: String,
    /// Chosen password
    pub password: String,
    /// Password repeated; must match `password`
    pub password_confirm: String,
    /// Optional display username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SignupRequest {
    /// Create a signup request without a username.
    pub fn new(
        phone: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
            username: None,
        }
    }

    /// Attach a display username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}
