use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{ApiClient, ApiError};
use crate::models::payment::PaymentStatusResponse;
use crate::models::{CheckoutLink, CreatePaymentResponse, PaymentRecord};

impl ApiClient {
    /// Creates the pending payment record for a membership and returns the
    /// hosted-checkout URL plus the backend's payment id.
    pub async fn create_checkout_link(&self, membership_id: i64) -> Result<CheckoutLink, ApiError> {
        let body = json!({ "membership_id": membership_id });
        let request = self.build_request(Method::POST, "payment/checkout-link", Some(body));
        self.execute(request).await
    }

    /// Asks the backend for the definitive status of a payment, e.g.
    /// "success" or "pending". Used by the manual reconciliation fallback.
    pub async fn check_payment_status(&self, payment_id: i64) -> Result<String, ApiError> {
        let path = format!("payment/{}/status", payment_id);
        let request = self.build_request(Method::GET, &path, None);
        let wrapper: PaymentStatusResponse = self.execute(request).await?;
        Ok(wrapper.status)
    }

    /// Fetches all past payments. Empty history is valid.
    pub async fn list_payments(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        let request = self.build_request(Method::GET, "payments", None);
        self.execute(request).await
    }

    /// Creates a payment record directly (legacy backend path kept for
    /// parity with the mobile client).
    pub async fn create_payment(&self, body: Value) -> Result<CreatePaymentResponse, ApiError> {
        let request = self.build_request(Method::POST, "payment/create", Some(body));
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

    /// The checkout link comes back with its URL and payment id.
    #[tokio::test]
    async fn test_create_checkout_link() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/payment/checkout-link")
            .with_status(200)
            .with_body(r#"{"checkout_url": "https://sq.example/pay", "payment_id": 42}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let link = client
            .create_checkout_link(7)
            .await
            .expect("link should decode");
        m.assert_async().await;
        assert_eq!(link.checkout_url, "https://sq.example/pay");
        assert_eq!(link.payment_id, Some(42));
    }

    /// Status polling unwraps the `{"status": ...}` wrapper.
    #[tokio::test]
    async fn test_check_payment_status() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/payment/42/status")
            .with_status(200)
            .with_body(r#"{"status": "pending"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let status = client
            .check_payment_status(42)
            .await
            .expect("status should decode");
        m.assert_async().await;
        assert_eq!(status, "pending");
    }

    /// Payment history decodes rows; an empty array is valid.
    #[tokio::test]
    async fn test_list_payments() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/payments")
            .with_status(200)
            .with_body(
                r#"[{"id": 1, "amount": 49.99, "status": "success",
                     "created_at": "2026-08-01T10:30:00+00:00"}]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let payments = client.list_payments().await.expect("history should decode");
        m.assert_async().await;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, "success");
    }
}
