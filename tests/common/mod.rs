#![allow(dead_code)]
//! In-process mock of the Sima portal backend.
//!
//! Every test boots its own instance on an ephemeral port, so the test
//! binary runs in parallel without shared state. Behavior toggles on
//! [`PortalState`] let individual tests force 401s, mis-scope guest
//! tokens, or delay the profile endpoint to race it against a sign-out.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_PHONE: &str = "+15551234567";
pub const TEST_PASSWORD: &str = "hunter2hunter2";
pub const LIVE_TOKEN: &str = "portal_test_token_1";
pub const DASHBOARD_UUID: &str = "4f6f188e-1b26-4d72-9d54-8347efdbc98a";
pub const EMBED_DOMAIN: &str = "https://embed.sima.test";

/// Shared mutable state of one mock portal instance.
#[derive(Default)]
pub struct PortalState {
    pub login_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub guest_token_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    pub sync_calls: AtomicUsize,
    pub dashboard_calls: AtomicUsize,

    /// When set, every authenticated endpoint answers 401 regardless of
    /// the token presented. Simulates server-side session expiry.
    pub reject_all: AtomicBool,

    /// When set, guest-token mints come back scoped to a different
    /// dashboard than the one requested.
    pub wrong_scope: AtomicBool,

    /// When set, guest-token mints fail with HTTP 500.
    pub fail_mints: AtomicBool,

    /// Delay before the profile endpoint answers, in milliseconds.
    pub profile_delay_ms: AtomicU64,

    /// Documents accepted by the ingestion endpoint, in arrival order.
    pub ingested_documents: Mutex<Vec<Value>>,

    /// Last prompt accepted by the system-prompt endpoint.
    pub system_prompt: Mutex<Option<String>>,
}

/// A running mock portal.
pub struct MockPortal {
    pub base_url: String,
    pub state: Arc<PortalState>,
}

impl MockPortal {
    pub async fn start() -> Self {
        let state = Arc::new(PortalState::default());
        let app = router(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock portal");
        let addr = listener.local_addr().expect("mock portal addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock portal serve");
        });
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    pub fn guest_token_calls(&self) -> usize {
        self.state.guest_token_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.state.chat_calls.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.state.sync_calls.load(Ordering::SeqCst)
    }

    pub fn dashboard_calls(&self) -> usize {
        self.state.dashboard_calls.load(Ordering::SeqCst)
    }

    pub fn ingested_documents(&self) -> Vec<Value> {
        self.state.ingested_documents.lock().unwrap().clone()
    }

    pub fn system_prompt(&self) -> Option<String> {
        self.state.system_prompt.lock().unwrap().clone()
    }

    /// Make every authenticated endpoint answer 401 from now on.
    pub fn expire_sessions(&self) {
        self.state.reject_all.store(true, Ordering::SeqCst);
    }

    /// Mint guest tokens scoped to the wrong dashboard from now on.
    pub fn mis_scope_guest_tokens(&self) {
        self.state.wrong_scope.store(true, Ordering::SeqCst);
    }

    /// Answer guest-token mints with HTTP 500 from now on.
    pub fn break_guest_tokens(&self) {
        self.state.fail_mints.store(true, Ordering::SeqCst);
    }

    /// Delay profile responses by `ms` milliseconds.
    pub fn delay_profile(&self, ms: u64) {
        self.state.profile_delay_ms.store(ms, Ordering::SeqCst);
    }
}

fn router(state: Arc<PortalState>) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/signup/", post(signup))
        .route("/api/auth/logout/", post(logout))
        .route("/api/auth/profile/", get(profile).put(update_profile))
        .route("/api/embed/guest-token/", post(mint_guest_token))
        .route(
            "/api/embed/guest-token/{token}/validate/",
            get(validate_guest_token),
        )
        .route(
            "/api/embed/dashboards/",
            get(list_dashboards).post(create_dashboard),
        )
        .route(
            "/api/embed/dashboards/{id}/",
            get(get_dashboard).put(put_dashboard).delete(delete_dashboard),
        )
        .route("/api/embed/sync/", post(sync_dashboards))
        .route("/api/embed/dashboard/{id}/", get(dashboard_info))
        .route("/api/rag/chat/", post(chat))
        .route("/api/rag/documents/", post(add_documents))
        .route("/api/rag/system-prompt/", put(replace_system_prompt))
        .with_state(state)
}

fn authorized(state: &PortalState, headers: &HeaderMap) -> bool {
    if state.reject_all.load(Ordering::SeqCst) {
        return false;
    }
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {}", LIVE_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "phone": TEST_PHONE,
        "username": "zahra",
        "first_name": "Zahra",
        "last_name": "Ahmadi",
        "created_at": "2025-01-15T08:30:00Z"
    })
}

fn dashboard_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "dashboard_uuid": DASHBOARD_UUID,
        "domain": EMBED_DOMAIN,
        "allowed_roles": [],
        "created_at": "2025-02-01T10:00:00Z",
        "updated_at": "2025-02-07T16:45:00Z"
    })
}

async fn login(State(state): State<Arc<PortalState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    let phone = body["phone"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if phone == TEST_PHONE && password == TEST_PASSWORD {
        Json(json!({
            "message": "Login successful",
            "user": user_json(),
            "token": LIVE_TOKEN
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid phone number or password."})),
        )
            .into_response()
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    let phone = body["phone"].as_str().unwrap_or_default();
    if phone.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"phone": ["This field is required."]})),
        )
            .into_response();
    }

    let mut user = user_json();
    user["id"] = json!(2);
    user["phone"] = json!(phone);
    user["username"] = body["username"].clone();
    user["first_name"] = json!("");
    user["last_name"] = json!("");

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully",
            "user": user,
            "token": LIVE_TOKEN
        })),
    )
        .into_response()
}

async fn logout(State(state): State<Arc<PortalState>>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!({"message": "Logged out successfully"})).into_response()
}

async fn profile(State(state): State<Arc<PortalState>>, headers: HeaderMap) -> Response {
    let delay = state.profile_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    Json(user_json()).into_response()
}

async fn update_profile(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut user = user_json();
    for field in ["username", "first_name", "last_name"] {
        if let Some(value) = body.get(field) {
            user[field] = value.clone();
        }
    }
    Json(user).into_response()
}

async fn mint_guest_token(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if state.fail_mints.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Could not mint a guest token."})),
        )
            .into_response();
    }
    let mint = state.guest_token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    let requested = body["dashboard_uuid"].as_str().unwrap_or_default();
    let granted = if state.wrong_scope.load(Ordering::SeqCst) {
        "0000-some-other-dashboard"
    } else {
        requested
    };

    Json(json!({
        "token": format!("guest_tok_{}", mint),
        "dashboard_uuid": granted,
        "domain": EMBED_DOMAIN
    }))
    .into_response()
}

async fn validate_guest_token(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if token.starts_with("guest_tok_") {
        Json(json!({
            "valid": true,
            "token_info": {
                "token": token,
                "dashboard_uuid": DASHBOARD_UUID,
                "expires_at": "2025-02-07T17:00:00Z",
                "created_at": "2025-02-07T16:55:00Z"
            }
        }))
        .into_response()
    } else {
        Json(json!({"valid": false})).into_response()
    }
}

async fn list_dashboards(State(state): State<Arc<PortalState>>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.dashboard_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        dashboard_json(1, "Sales Overview"),
        dashboard_json(2, "Field Operations")
    ]))
    .into_response()
}

async fn create_dashboard(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut record = dashboard_json(3, body["name"].as_str().unwrap_or_default());
    if let Some(uuid) = body.get("dashboard_uuid") {
        record["dashboard_uuid"] = uuid.clone();
    }
    if let Some(domain) = body.get("domain") {
        record["domain"] = domain.clone();
    }
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn get_dashboard(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(dashboard_json(id, "Sales Overview")).into_response()
}

async fn put_dashboard(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut record = dashboard_json(id, body["name"].as_str().unwrap_or("Sales Overview"));
    record["updated_at"] = json!("2025-02-08T09:00:00Z");
    Json(record).into_response()
}

async fn delete_dashboard(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Path(_id): Path<i64>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn sync_dashboards(State(state): State<Arc<PortalState>>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.sync_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({"message": "Synced 4 dashboards", "count": 4})).into_response()
}

async fn dashboard_info(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!({
        "id": id,
        "dashboard_title": "Sales Overview",
        "status": "published"
    }))
    .into_response()
}

// The upstream chat endpoint is reachable without authentication; the
// mock mirrors that so tests can prove the client sends no pre-guard.
async fn chat(State(state): State<Arc<PortalState>>, Json(body): Json<Value>) -> Response {
    state.chat_calls.fetch_add(1, Ordering::SeqCst);
    let query = body["query"].as_str().unwrap_or_default();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "query is required"})),
        )
            .into_response();
    }

    Json(json!({
        "matched_document_count": 3,
        "sample_documents": [
            {
                "id": "doc_17",
                "content": format!("First match for '{}'", query),
                "similarity": 0.93,
                "metadata": {"title": "Q3 field report"}
            },
            {
                "id": "doc_42",
                "content": "Second match",
                "similarity": 0.88
            }
        ]
    }))
    .into_response()
}

// Ingestion and prompt management are as open as chat upstream.
async fn add_documents(State(state): State<Arc<PortalState>>, Json(body): Json<Value>) -> Response {
    let documents = match body["documents"].as_array() {
        Some(documents) => documents.clone(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Validation failed"})),
            )
                .into_response()
        },
    };
    if documents
        .iter()
        .any(|doc| doc["content"].as_str().unwrap_or_default().is_empty())
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Validation failed"})),
        )
            .into_response();
    }

    let count = documents.len();
    state.ingested_documents.lock().unwrap().extend(documents);
    Json(json!({
        "message": format!("Successfully added {} documents", count),
        "document_count": count
    }))
    .into_response()
}

async fn replace_system_prompt(
    State(state): State<Arc<PortalState>>,
    Json(body): Json<Value>,
) -> Response {
    let prompt = body["system_prompt"].as_str().unwrap_or_default();
    if prompt.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Validation failed"})),
        )
            .into_response();
    }

    *state.system_prompt.lock().unwrap() = Some(prompt.to_string());
    Json(json!({"message": "System prompt updated successfully"})).into_response()
}
