//! Shared application state.
//!
//! Everything the app shell needs, wired once from config: credential
//! storage, the observable session, the event bus, the request pipeline,
//! and the payment reconciler. Services are constructed here and passed
//! around explicitly; nothing reaches for a global.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::ConfigV1;
use crate::credentials::{create_credential_store, CredentialStore};
use crate::events::EventBus;
use crate::payments::PaymentReconciler;
use crate::session::SessionState;

/// Application state shared across all screens.
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Durable storage of the single session token.
    pub credentials: Arc<dyn CredentialStore>,
    /// Observable authenticated/unauthenticated state.
    pub session: Arc<SessionState>,
    /// Typed cross-component notifications.
    pub events: EventBus,
    /// The authenticated-request pipeline and domain operations.
    pub api: Arc<ApiClient>,
    /// The checkout reconciliation state machine.
    pub payments: Arc<PaymentReconciler>,
}

impl AppState {
    /// Wires all services from the configuration. The session silently
    /// restores from any token already in the credential store.
    pub fn from_config(config: ConfigV1) -> Self {
        let config = Arc::new(config);
        let credentials = create_credential_store(&config.credentials);
        let events = EventBus::new();
        let session = Arc::new(SessionState::new(credentials.clone(), events.clone()));
        let api = Arc::new(ApiClient::new(
            &config.api,
            credentials.clone(),
            session.clone(),
        ));
        let payments = Arc::new(PaymentReconciler::new(
            api.clone(),
            events.clone(),
            &config.payment,
        ));

        AppState {
            config,
            credentials,
            session,
            events,
            api,
            payments,
        }
    }
}
