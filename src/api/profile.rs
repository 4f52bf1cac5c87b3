use reqwest::Method;

use crate::client::{ApiClient, ApiError};
use crate::models::UserProfile;

impl ApiClient {
    /// Fetches the signed-in user's account record.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let request = self.build_request(Method::GET, "user", None);
        self.execute(request).await
    }

    /// Deletes the account server-side. On success the caller must sign the
    /// session out; the backend will not honor the token afterwards.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let request = self.build_request(Method::DELETE, "user", None);
        self.send_classified(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::MemoryStore;
    use crate::events::EventBus;
    use crate::session::SessionState;
    use mockito::Server;
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

    /// The profile decodes into id/name/email.
    #[tokio::test]
    async fn test_fetch_profile() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"id": 3, "name": "Sam Lifter", "email": "sam@example.com"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let profile = client.fetch_profile().await.expect("profile should decode");
        m.assert_async().await;
        assert_eq!(profile.name, "Sam Lifter");
        assert_eq!(profile.email, "sam@example.com");
    }

    /// delete_account succeeds on any 2xx regardless of body.
    #[tokio::test]
    async fn test_delete_account() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", "/user")
            .with_status(200)
            .with_body(r#"{"message": "deleted"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        client.delete_account().await.expect("delete should succeed");
        m.assert_async().await;
    }
}
