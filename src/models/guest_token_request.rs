use serde::{Deserialize, Serialize};

/// Guest-token mint request, scoped to a single dashboard.
///
/// Constructed per mount and never persisted. Resource scoping and
/// row-level-security rules are optional; when omitted the backend applies
/// its defaults for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestTokenRequest {
    /// External dashboard identifier the token is scoped to
    pub dashboard_uuid: String,

    /// Optional resource scoping entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<EmbedResource>>,

    /// Optional row-level-security rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rls: Option<Vec<RlsRule>>,
}

impl GuestTokenRequest {
    /// Request a token for one dashboard with backend-default scoping.
    pub fn for_dashboard(dashboard_uuid: impl Into<String>) -> Self {
        Self {
            dashboard_uuid: dashboard_uuid.into(),
            resources: None,
            rls: None,
        }
    }

    /// Attach explicit resource scoping.
    pub fn with_resources(mut self, resources: Vec<EmbedResource>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Attach row-level-security rules.
    pub fn with_rls(mut self, rls: Vec<RlsRule>) -> Self {
        self.rls = Some(rls);
        self
    }
}

/// A resource entry inside a guest-token request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResource {
    /// Resource type (the embedding host understands "dashboard")
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource identifier
    pub id: String,
}

impl EmbedResource {
    /// Dashboard resource entry for the given external id.
    pub fn dashboard(id: impl Into<String>) -> Self {
        Self { kind: "dashboard".to_string(), id: id.into() }
    }
}

/// A row-level-security rule applied to the guest session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RlsRule {
    /// SQL-like filter clause, e.g. `region = 'Herat'`
    pub clause: String,
    /// Optional dataset the clause is limited to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<i64>,
}
