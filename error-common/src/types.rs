use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codes::public;

/// Error category that selects the sanitization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// General service errors, redacted only when a PHI marker is present
    Api,
    /// Always fully redacted
    Security,
    /// Always fully redacted
    Compliance,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Security => "security",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The failure handed back to callers after an error has been logged.
///
/// Every variant except [`SanitizedError::Passthrough`] carries a fixed
/// message and nothing from the original error.
#[derive(Error, Debug)]
pub enum SanitizedError<E> {
    /// API error whose message carried a PHI marker
    #[error("Healthcare data processing error")]
    HealthcareData,

    #[error("Security validation failed")]
    SecurityValidation,

    #[error("Compliance validation failed")]
    ComplianceValidation,

    /// API error without sensitive markers, returned as-is
    #[error("{0}")]
    Passthrough(E),
}

impl<E> SanitizedError<E> {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HealthcareData | Self::Passthrough(_) => ErrorCategory::Api,
            Self::SecurityValidation => ErrorCategory::Security,
            Self::ComplianceValidation => ErrorCategory::Compliance,
        }
    }

    /// True when the original error was replaced by a fixed message
    pub fn is_redacted(&self) -> bool {
        !matches!(self, Self::Passthrough(_))
    }

    /// Stable error code for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::HealthcareData => "healthcare_data_error",
            Self::SecurityValidation => "security_validation_failed",
            Self::ComplianceValidation => "compliance_validation_failed",
            Self::Passthrough(_) => "api_error",
        }
    }

    /// The fixed caller-facing message, if this failure was redacted
    pub fn fixed_message(&self) -> Option<&'static str> {
        match self {
            Self::HealthcareData => Some(public::HEALTHCARE_DATA_ERROR),
            Self::SecurityValidation => Some(public::SECURITY_VALIDATION_FAILED),
            Self::ComplianceValidation => Some(public::COMPLIANCE_VALIDATION_FAILED),
            Self::Passthrough(_) => None,
        }
    }

    pub fn original(&self) -> Option<&E> {
        match self {
            Self::Passthrough(error) => Some(error),
            _ => None,
        }
    }

    pub fn into_original(self) -> Option<E> {
        match self {
            Self::Passthrough(error) => Some(error),
            _ => None,
        }
    }
}

/// An error the sanitizer can describe: `Display` gives the message and
/// [`IncomingError::stack_trace`] gives the trace when one was captured.
pub trait IncomingError: fmt::Debug + fmt::Display {
    fn stack_trace(&self) -> Option<String> {
        None
    }
}

impl IncomingError for anyhow::Error {
    fn stack_trace(&self) -> Option<String> {
        let backtrace = self.backtrace();
        match backtrace.status() {
            std::backtrace::BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        }
    }
}

impl IncomingError for std::io::Error {}

impl IncomingError for Box<dyn std::error::Error + Send + Sync> {}

/// Plain service error with an optional stack trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TracedError {
    message: String,
    stack_trace: Option<String>,
}

impl TracedError {
    /// Error without a stack trace
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: None,
        }
    }

    /// Error carrying a stack trace of the current call site
    pub fn captured(message: impl Into<String>) -> Self {
        let trace = backtrace::Backtrace::new();
        Self {
            message: message.into(),
            stack_trace: Some(format!("{trace:?}")),
        }
    }

    pub fn with_stack_trace(message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: Some(stack_trace.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IncomingError for TracedError {
    fn stack_trace(&self) -> Option<String> {
        self.stack_trace.clone()
    }
}

/// Result type alias for sanitized service operations
pub type Result<T, E> = std::result::Result<T, SanitizedError<E>>;
