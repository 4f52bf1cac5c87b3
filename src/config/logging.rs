use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How tracing output is set up at startup.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct LoggingConfig {
    /// Severity floor: "trace", "debug", "info", "warn" or "error".
    pub level: String,
    /// "json" for structured output, anything else for console.
    pub format: String,
}
