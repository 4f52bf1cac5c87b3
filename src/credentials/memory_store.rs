use std::sync::Mutex;

use super::base::CredentialStore;

/// An in-process credential store with the same replace/absent semantics as
/// the platform keyring. Used by tests and headless environments.
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            token: Mutex::new(None),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, token: &str) -> Result<(), String> {
        let mut slot = self.token.lock().expect("credential mutex poisoned");
        *slot = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let slot = self.token.lock().expect("credential mutex poisoned");
        slot.as_ref().filter(|t| !t.is_empty()).cloned()
    }

    fn clear(&self) -> Result<(), String> {
        let mut slot = self.token.lock().expect("credential mutex poisoned");
        *slot = None;
        Ok(())
    }
}
