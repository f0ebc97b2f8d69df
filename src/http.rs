//! Shared HTTP transport for all portal endpoints.
//!
//! Every sub-client sends its requests through one [`HttpTransport`], which
//! gives the crate a single place for the three cross-cutting rules:
//!
//! - the bearer token is attached to every request whenever the session
//!   holds one;
//! - every response is inspected for HTTP 401. A 401 on an authenticated
//!   session tears it down globally, no matter which operation produced
//!   the response. The epoch the token was read under rides along with the
//!   request, so a 401 landing after a teardown cannot take down whatever
//!   session is live by then;
//! - a failed request is surfaced to the caller exactly once. There is no
//!   retry or backoff anywhere; the user decides whether to try again.

use log::{debug, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

use crate::error::{Result, SimaLinkError};
use crate::models::error_body;
use crate::session::SessionHandle;

/// Transport shared by every sub-client. Cheap to clone.
#[derive(Clone)]
pub(crate) struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
    session: SessionHandle,
}

impl HttpTransport {
    pub(crate) fn new(
        base_url: String,
        http_client: reqwest::Client,
        session: SessionHandle,
    ) -> Self {
        Self { base_url, http_client, session }
    }

    /// The session handle this transport reports 401s to.
    pub(crate) fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.send::<()>(Method::GET, path, None).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(Method::POST, path, Some(body)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(Method::PUT, path, Some(body)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// DELETE, discarding any response body (the portal answers 204).
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// POST without a request body (sync).
    pub(crate) async fn post_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.send::<()>(Method::POST, path, None).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST without a request body, under an explicitly supplied token
    /// instead of the live session's (the logout farewell call, sent after
    /// local teardown). A 401 answer is surfaced to the caller but never
    /// reported to the session: the request was not sent on its behalf.
    pub(crate) async fn post_no_body_with_bearer<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: &str,
    ) -> Result<T> {
        let bytes = self
            .execute::<()>(Method::POST, path, None, Some(bearer.to_string()), None)
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send one request under the live session's token.
    ///
    /// Token and epoch are captured as one snapshot, so the 401 arm can
    /// tell whether the rejected request belonged to the session that is
    /// current when the response lands.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let (bearer, epoch) = self.session.bearer_snapshot()?;
        self.execute(method, path, body, bearer, Some(epoch)).await
    }

    /// Send one request and classify the outcome.
    ///
    /// Exactly one attempt per call: transport failures come back as
    /// `NetworkError`, a 401 as `Unauthorized` (after notifying the
    /// session, when `session_epoch` marks the request as sent under it),
    /// any other non-2xx as `ServerError` with whatever message the body
    /// carried.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<String>,
        session_epoch: Option<u64>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req_builder = self.http_client.request(method.clone(), &url);

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }
        if let Some(token) = bearer {
            req_builder = req_builder.bearer_auth(token);
        }

        debug!("[HTTP] Sending {} to {}", method, loggable(&url));
        let start = Instant::now();

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "[HTTP] Transport error: {} duration_ms={}",
                    e,
                    start.elapsed().as_millis()
                );
                return Err(e.into());
            },
        };

        let duration_ms = start.elapsed().as_millis();
        let status = response.status();
        debug!("[HTTP] Response received: status={} duration_ms={}", status, duration_ms);

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(bytes.to_vec());
        }

        let body_bytes = response.bytes().await.unwrap_or_default();
        let message = error_body::extract_message(&body_bytes).unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let torn_down = match session_epoch {
                Some(epoch) => self.session.handle_unauthorized(epoch)?,
                None => false,
            };
            warn!(
                "[HTTP] 401 from {} {} (session teardown: {})",
                method, path, torn_down
            );
            return Err(SimaLinkError::Unauthorized(message));
        }

        warn!(
            "[HTTP] Server error: status={} message=\"{}\" duration_ms={}",
            status, message, duration_ms
        );
        Err(SimaLinkError::ServerError { status_code: status.as_u16(), message })
    }
}

/// URL as it may appear in a log line. The guest-token validation route
/// carries the token in the path; everything else is safe as-is.
fn loggable(url: &str) -> String {
    const MARKER: &str = "/guest-token/";
    if let Some(start) = url.find(MARKER) {
        let token_start = start + MARKER.len();
        if let Some(token_len) = url[token_start..].find('/') {
            if token_len > 0 {
                return format!(
                    "{}<token>{}",
                    &url[..token_start],
                    &url[token_start + token_len..]
                );
            }
        }
    }
    url.to_string()
}
