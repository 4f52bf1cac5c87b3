use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::credentials::CredentialStore;
use crate::events::{AppEvent, EventBus};

/// The single source of truth for "is this client authenticated".
///
/// The flag is a projection of credential presence: it only moves through
/// two transitions, a successful identity exchange (to authenticated) and
/// sign-out or server-detected invalidity (to unauthenticated). Screens
/// observe it through a watch channel so the transition lands before their
/// next render.
pub struct SessionState {
    credentials: Arc<dyn CredentialStore>,
    events: EventBus,
    authenticated: watch::Sender<bool>,
}

impl SessionState {
    /// Builds the session state, restoring the authenticated flag from any
    /// token already in the credential store (silent restore across process
    /// restarts).
    pub fn new(credentials: Arc<dyn CredentialStore>, events: EventBus) -> Self {
        let restored = credentials.read().is_some();
        if restored {
            info!("Restored existing session from credential store.");
        }
        let (authenticated, _) = watch::channel(restored);
        SessionState {
            credentials,
            events,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Observe the authenticated flag. The receiver sees the current value
    /// immediately and every transition afterwards.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Persists the exchanged token and flips to authenticated. The only
    /// legal way in.
    pub fn sign_in_succeeded(&self, token: &str) -> Result<(), String> {
        self.credentials.save(token)?;
        self.authenticated.send_replace(true);
        info!("Session authenticated.");
        Ok(())
    }

    /// Explicit user sign-out: clears the stored token and flips to
    /// unauthenticated.
    pub fn sign_out(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!("Failed to clear credential store on sign-out: {}", e);
        }
        let was_authenticated = self.authenticated.send_replace(false);
        if was_authenticated {
            self.events.publish(AppEvent::SessionInvalidated);
        }
    }

    /// Forced sign-out after the server rejected the session. Single-flight:
    /// concurrent failing requests collapse to exactly one store clear and
    /// one `SessionInvalidated` broadcast, because only the caller that
    /// actually flips the flag proceeds.
    pub fn invalidate(&self) {
        let was_authenticated = self.authenticated.send_replace(false);
        if !was_authenticated {
            return;
        }
        warn!("Server reported the session invalid; signing out.");
        if let Err(e) = self.credentials.clear() {
            warn!("Failed to clear credential store on invalidation: {}", e);
        }
        self.events.publish(AppEvent::SessionInvalidated);
    }
}
