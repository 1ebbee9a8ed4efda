//! Error sanitization utilities for RustCare Engine service layers
//!
//! This module intercepts errors raised inside request handlers, writes one
//! structured diagnostic record for operators, and hands the caller a fixed,
//! non-sensitive replacement error. Nothing here holds state: every operation
//! takes its sink and execution mode as arguments.
//!
//! # Error Categories
//!
//! - **Api**: General service errors. Passed through unchanged unless the
//!   message carries a PHI marker, in which case the caller sees
//!   "Healthcare data processing error"
//! - **Security**: Always fully redacted. The original error never reaches
//!   the log or the caller
//! - **Compliance**: Always fully redacted, same as security
//!
//! # Example
//!
//! ```rust
//! use std::convert::Infallible;
//! use error_common::{
//!     handle_api_error, ExecutionMode, InMemorySink, SanitizedError, TracedError,
//! };
//!
//! fn export_patients(sink: &InMemorySink) -> Result<Infallible, SanitizedError<TracedError>> {
//!     let failure = TracedError::new("PHI leak detected in export");
//!     handle_api_error(failure, "export-job", sink, ExecutionMode::Production)
//! }
//!
//! let sink = InMemorySink::new();
//! let err = export_patients(&sink).unwrap_err();
//! assert_eq!(err.to_string(), "Healthcare data processing error");
//!
//! // The operator-facing record still carries the original text
//! assert_eq!(sink.records()[0].message, "PHI leak detected in export");
//! ```

pub mod codes;
pub mod mode;
pub mod reporting;
pub mod sanitization;
pub mod types;

pub use mode::*;
pub use reporting::*;
pub use sanitization::*;
pub use types::*;
