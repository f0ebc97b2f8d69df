use serde::{Deserialize, Serialize};

/// Login request body for authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Phone number used as the login identifier
    pub phone: String,
    /// Password for authentication
    pub password: String,
}
