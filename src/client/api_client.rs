use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::credentials::CredentialStore;
use crate::session::SessionState;

/// The authenticated-request pipeline: builds requests against the
/// configured base URL, executes them, classifies the outcome, and forces a
/// global sign-out when the server reports the session invalid. Every
/// domain operation goes through here; none of them handles invalidation
/// themselves.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn CredentialStore>,
    session: Arc<SessionState>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        session: Arc<SessionState>,
    ) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_in_secs),
            credentials,
            session,
        }
    }

    /// Builds a request for `path` (relative to the base URL) with JSON
    /// accept/content-type headers, and a bearer Authorization header if and
    /// only if the credential store currently holds a token. Requests
    /// without a token are legal (the identity exchange is one).
    pub fn build_request(&self, method: Method, path: &str, body: Option<Value>) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        match self.credentials.read() {
            Some(token) => request = request.bearer_auth(token),
            None => debug!("No token in credential store; sending unauthenticated request."),
        }

        if let Some(body) = body {
            request = request.json(&body);
        }
        request
    }

    /// Sends the request and classifies the transport/status layer:
    /// transport failure, invalid-session rejection (with the forced
    /// sign-out side effect), or any other non-2xx. On success, returns the
    /// status and raw body for the caller to decode.
    pub async fn send_classified(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            if signals_invalid_session(status, &body) {
                warn!("Request rejected as unauthenticated (status {}).", status);
                self.session.invalidate();
                return Err(ApiError::Unauthenticated);
            }
            return Err(ApiError::Server { status, body });
        }
        Ok((status, body))
    }

    /// Executes the request and decodes a 2xx JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (_, body) = self.send_classified(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decoding(e.to_string()))
    }
}

/// Whether a rejection means "this session is invalid". The backend signals
/// it with a 401, or with an "Unauthenticated." message in the error body.
fn signals_invalid_session(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::UNAUTHORIZED {
        return true;
    }
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string());
    message.to_lowercase().contains("unauthenticated")
}
