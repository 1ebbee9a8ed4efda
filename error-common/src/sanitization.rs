// Sanitization utilities
// Log the original error for operators, hand the caller a safe replacement

use std::convert::Infallible;

use crate::codes::{markers, sensitive};
use crate::mode::ExecutionMode;
use crate::reporting::{DiagnosticRecord, DiagnosticSink};
use crate::types::{ErrorCategory, IncomingError, SanitizedError};

/// Outcome of a sanitizing handler. There is no success value, so a handler
/// call can only ever produce the `Err` side.
pub type Sanitized<E> = Result<Infallible, SanitizedError<E>>;

/// True when the message contains "PHI" or "sensitive" (case-sensitive)
pub fn contains_sensitive_marker(message: &str) -> bool {
    sensitive::ALL.iter().any(|marker| message.contains(marker))
}

/// Log an API error and fail.
///
/// The record carries the original message, plus the stack trace when `mode`
/// is development. The caller gets the original error back unless its message
/// contains a PHI marker, in which case it gets
/// [`SanitizedError::HealthcareData`].
pub fn handle_api_error<E, S>(error: E, context: &str, sink: &S, mode: ExecutionMode) -> Sanitized<E>
where
    E: IncomingError,
    S: DiagnosticSink + ?Sized,
{
    let message = error.to_string();
    let stack_trace = if mode.is_development() {
        error.stack_trace()
    } else {
        None
    };
    let redact = contains_sensitive_marker(&message);

    sink.emit(&DiagnosticRecord::new(ErrorCategory::Api, context, message, stack_trace));
    tracing::debug!(category = "api", context = context, redacted = redact, "Error sanitized");

    if redact {
        Err(SanitizedError::HealthcareData)
    } else {
        Err(SanitizedError::Passthrough(error))
    }
}

/// Log a security incident marker and fail with "Security validation failed".
///
/// Nothing from `error` is logged or returned.
pub fn handle_security_error<E, S>(error: E, context: &str, sink: &S) -> Sanitized<E>
where
    S: DiagnosticSink + ?Sized,
{
    drop(error);
    sink.emit(&DiagnosticRecord::new(
        ErrorCategory::Security,
        context,
        markers::SECURITY_INCIDENT,
        None,
    ));
    tracing::debug!(category = "security", context = context, redacted = true, "Error sanitized");

    Err(SanitizedError::SecurityValidation)
}

/// Log a compliance violation marker and fail with "Compliance validation failed".
///
/// Nothing from `error` is logged or returned.
pub fn handle_compliance_error<E, S>(error: E, context: &str, sink: &S) -> Sanitized<E>
where
    S: DiagnosticSink + ?Sized,
{
    drop(error);
    sink.emit(&DiagnosticRecord::new(
        ErrorCategory::Compliance,
        context,
        markers::COMPLIANCE_VIOLATION,
        None,
    ));
    tracing::debug!(category = "compliance", context = context, redacted = true, "Error sanitized");

    Err(SanitizedError::ComplianceValidation)
}

/// Sink and execution mode bundled for handlers that sanitize many errors.
///
/// Holds no per-call state; clones share the sink.
#[derive(Debug, Clone)]
pub struct ErrorSanitizer<S> {
    sink: S,
    mode: ExecutionMode,
}

impl<S: DiagnosticSink> ErrorSanitizer<S> {
    pub fn new(sink: S, mode: ExecutionMode) -> Self {
        Self { sink, mode }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn api<E: IncomingError>(&self, error: E, context: &str) -> Sanitized<E> {
        handle_api_error(error, context, &self.sink, self.mode)
    }

    pub fn security<E>(&self, error: E, context: &str) -> Sanitized<E> {
        handle_security_error(error, context, &self.sink)
    }

    pub fn compliance<E>(&self, error: E, context: &str) -> Sanitized<E> {
        handle_compliance_error(error, context, &self.sink)
    }

    /// Pass `Ok` through, route `Err` through [`ErrorSanitizer::api`]
    pub fn guard_api<T, E: IncomingError>(
        &self,
        result: Result<T, E>,
        context: &str,
    ) -> Result<T, SanitizedError<E>> {
        result.or_else(|error| into_failure(self.api(error, context)))
    }

    pub fn guard_security<T, E>(&self, result: Result<T, E>, context: &str) -> Result<T, SanitizedError<E>> {
        result.or_else(|error| into_failure(self.security(error, context)))
    }

    pub fn guard_compliance<T, E>(&self, result: Result<T, E>, context: &str) -> Result<T, SanitizedError<E>> {
        result.or_else(|error| into_failure(self.compliance(error, context)))
    }
}

fn into_failure<T, E>(outcome: Sanitized<E>) -> Result<T, SanitizedError<E>> {
    match outcome {
        Ok(never) => match never {},
        Err(error) => Err(error),
    }
}
