use std::sync::Arc;

use tracing::info;

use super::keyring_store::KeyringStore;
use super::memory_store::MemoryStore;
use crate::config::{CredentialsBackend, CredentialsConfig};

/// The CredentialStore trait abstracts durable storage of the single
/// session token (save, read, clear).
///
/// Contract: `save` atomically replaces any existing value; `clear` is
/// equivalent to saving nothing; a missing token is `None`, never an error.
/// The token must not be retained anywhere else beyond the lifetime of a
/// single request.
pub trait CredentialStore: Send + Sync {
    fn save(&self, token: &str) -> Result<(), String>;
    fn read(&self) -> Option<String>;
    fn clear(&self) -> Result<(), String>;
}

/// Creates a concrete credential store implementation based on the config.
pub fn create_credential_store(config: &CredentialsConfig) -> Arc<dyn CredentialStore> {
    match &config.backend {
        CredentialsBackend::Keyring(keyring_config) => {
            info!(
                "Using platform keyring store (service='{}', account='{}').",
                keyring_config.service, keyring_config.account
            );
            Arc::new(KeyringStore::new(keyring_config))
        }
        CredentialsBackend::Memory => {
            info!("Using in-memory credential store.");
            Arc::new(MemoryStore::new())
        }
    }
}
