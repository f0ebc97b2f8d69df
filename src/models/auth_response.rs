use serde::{Deserialize, Serialize};

use super::user::User;

/// Response returned by the login and signup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Optional informational message (e.g. "Login successful")
    #[serde(default)]
    pub message: Option<String>,
    /// Authenticated user record
    pub user: User,
    /// Bearer token for subsequent API calls
    pub token: String,
    /// Refresh token, when the backend issues one
    #[serde(default)]
    pub refresh_token: Option<String>,
}
