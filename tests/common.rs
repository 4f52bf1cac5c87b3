use gymtron::config::{
    ApiConfig, ConfigV1, CredentialsBackend, CredentialsConfig, LoggingConfig, PaymentConfig,
};
use gymtron::state::AppState;

/// Builds a full configuration pointed at a test server, with the
/// in-memory credential backend so no platform keyring is touched.
pub fn test_config(base_url: &str, fallback_after_secs: u64) -> ConfigV1 {
    ConfigV1 {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_in_secs: 5,
        },
        credentials: CredentialsConfig {
            backend: CredentialsBackend::Memory,
        },
        payment: PaymentConfig {
            callback_scheme: "gymmembership".to_string(),
            fallback_after_secs,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "console".to_string(),
        },
    }
}

/// Wires the whole application state against a test server.
pub fn build_app(base_url: &str) -> AppState {
    AppState::from_config(test_config(base_url, 30))
}
