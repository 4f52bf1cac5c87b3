use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A wrapper for the credential storage configuration. The backend is
/// differentiated via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct CredentialsConfig {
    #[serde(flatten)]
    pub backend: CredentialsBackend,
}

/// The existing credential storage backends.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum CredentialsBackend {
    /// Platform secure storage (Keychain, Credential Manager, keyutils).
    #[serde(rename = "keyring")]
    Keyring(KeyringConfig),
    /// In-process storage, for tests and headless environments.
    #[serde(rename = "memory")]
    Memory,
}

/// The fixed (service, account) pair the single session token lives under.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct KeyringConfig {
    pub service: String,
    pub account: String,
}
