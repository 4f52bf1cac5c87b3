use keyring::Entry;
use tracing::{debug, warn};

use super::base::CredentialStore;
use crate::config::KeyringConfig;

/// Stores the session token in the platform secure store (Keychain on
/// macOS/iOS, Credential Manager on Windows, keyutils on Linux), keyed by
/// a fixed service/account pair. Survives process restarts and is not
/// readable by other applications.
pub struct KeyringStore {
    service: String,
    account: String,
}

impl KeyringStore {
    pub fn new(config: &KeyringConfig) -> Self {
        KeyringStore {
            service: config.service.clone(),
            account: config.account.clone(),
        }
    }

    fn entry(&self) -> Result<Entry, String> {
        Entry::new(&self.service, &self.account)
            .map_err(|e| format!("Failed to open keyring entry: {}", e))
    }
}

impl CredentialStore for KeyringStore {
    fn save(&self, token: &str) -> Result<(), String> {
        // set_password replaces any existing value for the entry in one
        // operation; there is no window where both old and new are readable.
        self.entry()?
            .set_password(token)
            .map_err(|e| format!("Failed to save token: {}", e))
    }

    fn read(&self) -> Option<String> {
        let entry = match self.entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Keyring unavailable: {}", e);
                return None;
            }
        };
        match entry.get_password() {
            Ok(token) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!("Failed to read token from keyring: {}", e);
                None
            }
        }
    }

    fn clear(&self) -> Result<(), String> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            // Nothing stored is a valid cleared state.
            Err(keyring::Error::NoEntry) => {
                debug!("Keyring entry already absent on clear.");
                Ok(())
            }
            Err(e) => Err(format!("Failed to clear token: {}", e)),
        }
    }
}
