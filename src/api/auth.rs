use reqwest::Method;
use serde_json::json;

use crate::client::{ApiClient, ApiError};
use crate::models::AuthResponse;

impl ApiClient {
    /// Exchanges a third-party identity token for a backend session token.
    /// Unauthenticated by construction; on success the caller hands the
    /// access token to `SessionState::sign_in_succeeded`.
    pub async fn exchange_google_token(&self, id_token: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "id_token": id_token });
        let request = self.build_request(Method::POST, "auth/google/token", Some(body));
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::MemoryStore;
    use crate::events::EventBus;
    use crate::session::SessionState;
    use mockito::{Matcher, Server};
    use std::sync::Arc;

    fn client_for(url: &str) -> ApiClient {
        let store = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionState::new(store.clone(), EventBus::new()));
        let config = ApiConfig {
            base_url: url.to_string(),
            timeout_in_secs: 5,
        };
        ApiClient::new(&config, store, session)
    }

    /// The exchange posts the id token and decodes the token envelope.
    #[tokio::test]
    async fn test_exchange_google_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/google/token")
            .match_body(Matcher::Json(serde_json::json!({"id_token": "google-id"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let auth = client
            .exchange_google_token("google-id")
            .await
            .expect("exchange should succeed");
        m.assert_async().await;
        assert_eq!(auth.access_token, "abc");
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);
    }
}
