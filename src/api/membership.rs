use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::client::{ApiClient, ApiError};
use crate::models::membership::CurrentMembershipResponse;
use crate::models::plan::PlansResponse;
use crate::models::{DashboardResponse, Membership, MembershipEnvelope, Plan};

impl ApiClient {
    /// Fetches the dashboard snapshot. A null nested membership is a valid
    /// "no membership" result, not an error.
    pub async fn fetch_dashboard(&self) -> Result<DashboardResponse, ApiError> {
        let request = self.build_request(Method::GET, "dashboard", None);
        self.execute(request).await
    }

    /// Lists available plans, optionally filtered by name. An empty list is
    /// a valid result.
    pub async fn list_plans(&self, filter: Option<&str>) -> Result<Vec<Plan>, ApiError> {
        let mut request = self.build_request(Method::GET, "plans", None);
        if let Some(name) = filter.filter(|n| !n.is_empty()) {
            request = request.query(&[("name", name)]);
        }
        let wrapper: PlansResponse = self.execute(request).await?;
        Ok(wrapper.plans)
    }

    /// Subscribes to a plan. The backend answers 201 Created with the new
    /// membership in the body; anything else (even another 2xx) is a
    /// distinguishable server error. Returns the created membership id.
    pub async fn subscribe(&self, plan_id: i64) -> Result<i64, ApiError> {
        let body = json!({ "plan_id": plan_id });
        let request = self.build_request(Method::POST, "subscribe", Some(body));
        let (status, body) = self.send_classified(request).await?;
        if status != StatusCode::CREATED {
            return Err(ApiError::Server { status, body });
        }
        let envelope: MembershipEnvelope =
            serde_json::from_str(&body).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(envelope.membership.id)
    }

    /// Fetches the user's current membership; None when there is none.
    pub async fn fetch_current_membership(&self) -> Result<Option<Membership>, ApiError> {
        let request = self.build_request(Method::GET, "membership/current", None);
        let wrapper: CurrentMembershipResponse = self.execute(request).await?;
        Ok(wrapper.membership)
    }

    /// Cancels the active subscription. The dashboard must be re-fetched
    /// afterwards by the caller.
    pub async fn cancel_subscription(&self) -> Result<(), ApiError> {
        let request = self.build_request(Method::POST, "subscription/cancel", None);
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

    /// An empty plans wrapper yields an empty list, not an error.
    #[tokio::test]
    async fn test_list_plans_empty_is_valid() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/plans")
            .with_status(200)
            .with_body(r#"{"plans": []}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let plans = client.list_plans(None).await.expect("empty list is valid");
        m.assert_async().await;
        assert!(plans.is_empty());
    }

    /// The name filter goes out as a query parameter.
    #[tokio::test]
    async fn test_list_plans_with_filter() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/plans")
            .match_query(Matcher::UrlEncoded("name".into(), "yoga".into()))
            .with_status(200)
            .with_body(
                r#"{"plans": [{"id": 1, "name": "Yoga", "price": 30.0, "duration_months": 1}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let plans = client
            .list_plans(Some("yoga"))
            .await
            .expect("filtered list should parse");
        m.assert_async().await;
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Yoga");
    }

    /// subscribe returns the created membership id on 201.
    #[tokio::test]
    async fn test_subscribe_created() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/subscribe")
            .match_body(Matcher::Json(serde_json::json!({"plan_id": 2})))
            .with_status(201)
            .with_body(r#"{"message": "subscribed", "membership": {"id": 7}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let membership_id = client.subscribe(2).await.expect("201 should succeed");
        m.assert_async().await;
        assert_eq!(membership_id, 7);
    }

    /// A 2xx other than 201 is still a distinguishable subscription failure.
    #[tokio::test]
    async fn test_subscribe_requires_created_status() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/subscribe")
            .with_status(200)
            .with_body(r#"{"message": "queued"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.subscribe(2).await;
        m.assert_async().await;
        match result {
            Err(ApiError::Server { status, .. }) => assert_eq!(status, StatusCode::OK),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    /// `membership/current` with a null membership means "none", not an error.
    #[tokio::test]
    async fn test_fetch_current_membership_null() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/membership/current")
            .with_status(200)
            .with_body(r#"{"membership": null}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let membership = client
            .fetch_current_membership()
            .await
            .expect("null membership is valid");
        m.assert_async().await;
        assert!(membership.is_none());
    }
}
