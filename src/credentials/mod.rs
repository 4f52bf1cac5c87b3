pub mod base;
pub mod keyring_store;
pub mod memory_store;

pub use base::{create_credential_store, CredentialStore};
pub use keyring_store::KeyringStore;
pub use memory_store::MemoryStore;
