use serde::{Deserialize, Serialize};

/// User record as the portal backend serializes it.
///
/// The phone number is the canonical identity field; username and name
/// parts are display-only and may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Internal user id
    pub id: i64,

    /// Phone number (unique login identifier)
    pub phone: String,

    /// Optional display username
    #[serde(default)]
    pub username: String,

    /// Given name (may be empty)
    #[serde(default)]
    pub first_name: String,

    /// Family name (may be empty)
    #[serde(default)]
    pub last_name: String,

    /// Account creation time in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Best available name for display: full name, then username, then phone.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.username.is_empty() {
            self.username.clone()
        } else {
            self.phone.clone()
        }
    }
}
