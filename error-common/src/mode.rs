use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the process execution mode
pub const EXECUTION_MODE_ENV: &str = "RUSTCARE_ENV";

/// Whether the process runs in a development-like mode.
///
/// Only development mode lets stack traces into API diagnostic records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ExecutionMode {
    Development,
    #[default]
    Production,
}

impl ExecutionMode {
    /// Read the mode from `RUSTCARE_ENV`, falling back to production when unset
    pub fn from_env() -> Self {
        std::env::var(EXECUTION_MODE_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Map a raw mode string. Unknown values count as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl From<String> for ExecutionMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl FromStr for ExecutionMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
