// Logger configuration
use config::{Config, Environment, Map};
use error_common::ExecutionMode;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment prefix shared by every logger setting
pub const ENV_PREFIX: &str = "RUSTCARE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Loaded from `RUSTCARE_ENV`
    #[serde(rename = "env", default)]
    pub mode: ExecutionMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Falls back to pretty output in development and JSON otherwise
    #[serde(default)]
    pub log_format: Option<LogFormat>,
    #[serde(default = "enabled")]
    pub redact_pii: bool,
    #[serde(default = "enabled")]
    pub hash_for_correlation: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn enabled() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            log_level: default_log_level(),
            log_format: None,
            redact_pii: true,
            hash_for_correlation: true,
        }
    }
}

impl LoggerConfig {
    /// Load from `RUSTCARE_*` process environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit variable map, e.g. `RUSTCARE_ENV=development`
    pub fn from_vars(vars: Map<String, String>) -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    pub fn with_redaction(mut self, enabled: bool) -> Self {
        self.redact_pii = enabled;
        self
    }

    pub fn format(&self) -> LogFormat {
        self.log_format.unwrap_or(if self.mode.is_development() {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        })
    }
}
