use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::credentials::CredentialsConfig;
use super::logging::LoggingConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend endpoint, credential storage,
/// payment reconciliation, and logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    pub logging: LoggingConfig,
}

/// Where the backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are appended to, e.g. "https://gym.example.com/api".
    pub base_url: String,
    #[serde(default = "default_timeout_in_secs")]
    pub timeout_in_secs: u64,
}

fn default_timeout_in_secs() -> u64 {
    30
}

/// Settings for the out-of-band checkout flow.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PaymentConfig {
    /// Custom URL scheme the hosted checkout redirects back to.
    pub callback_scheme: String,
    /// Seconds without a redirect callback before the manual
    /// verification fallback is offered.
    pub fallback_after_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        PaymentConfig {
            callback_scheme: "gymmembership".to_string(),
            fallback_after_secs: 10,
        }
    }
}

/// Load config from a YAML file named "config.yaml" in the current directory,
/// with environment overrides prefixed "GYMTRON_" (e.g. GYMTRON_API__BASE_URL).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("GYMTRON_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}
