use serde::{Deserialize, Serialize};

/// A dashboard record from the portal's embedding allow-list.
///
/// Read-only from the client's perspective; the backend owns the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRecord {
    /// Internal catalog id
    pub id: i64,

    /// Display name
    pub name: String,

    /// External identifier used for embedding and guest tokens
    pub dashboard_uuid: String,

    /// Domain of the embedding host serving this dashboard
    pub domain: String,

    /// Roles allowed to view the dashboard (empty = everyone)
    #[serde(default)]
    pub allowed_roles: Vec<String>,

    /// Record creation time in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time in RFC3339 format
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for creating or replacing a catalog record (administrative).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDraft {
    /// Display name
    pub name: String,
    /// External identifier used for embedding and guest tokens
    pub dashboard_uuid: String,
    /// Domain of the embedding host serving this dashboard
    pub domain: String,
    /// Roles allowed to view the dashboard
    #[serde(default)]
    pub allowed_roles: Vec<String>,
}

impl DashboardDraft {
    /// Draft with an empty role allow-list.
    pub fn new(
        name: impl Into<String>,
        dashboard_uuid: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dashboard_uuid: dashboard_uuid.into(),
            domain: domain.into(),
            allowed_roles: Vec::new(),
        }
    }

    /// Restrict the dashboard to the given roles.
    pub fn with_allowed_roles(mut self, roles: Vec<String>) -> Self {
        self.allowed_roles = roles;
        self
    }
}
