//! Diagnostic sinks for sanitized service errors
//!
//! This crate supplies the concrete destinations for the records written by
//! `error-common`'s sanitizing handlers, plus the process-wide `tracing`
//! setup. Records can be scrubbed of PII (Personally Identifiable
//! Information) before they are written, so operator logs stay HIPAA-safe
//! even when an upstream error message quotes patient data.
//!
//! # Sinks
//!
//! - **TracingSink**: One `tracing` error event per record, target `diagnostics`
//! - **JsonLinesSink**: Compact JSON object per line on any `Write`
//! - **RedactingSink**: Wraps another sink and scrubs message and stack trace
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: user@example.com → ***@***
//! - **Phone Numbers**: (555) 123-4567 → (***) ***-****
//! - **SSN**: 123-45-6789 → ***-**-****
//! - **Credit Cards**: 4111-1111-1111-1111 → ****-****-****-****
//! - **IP Addresses**: 192.168.1.1 → ***.***.***.***
//! - **Medical Record Numbers**: MRN123456 → MRN******
//!
//! With `hash_for_correlation` on, matches become `KIND[hash]` instead so the
//! same value can be followed across log lines.
//!
//! # Example
//!
//! ```rust,no_run
//! use error_common::ErrorSanitizer;
//! use logger_redacted::{build_sink, init_tracing, LoggerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LoggerConfig::from_env()?;
//!     init_tracing(&config)?;
//!
//!     let sanitizer = ErrorSanitizer::new(build_sink(&config), config.mode);
//!     let err = sanitizer
//!         .security(std::io::Error::other("token replay attempt"), "auth-middleware")
//!         .unwrap_err();
//!     assert_eq!(err.to_string(), "Security validation failed");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```text
//! RUSTCARE_ENV=production            # development | dev | local enable stack traces
//! RUSTCARE_LOG_LEVEL=info
//! RUSTCARE_LOG_FORMAT=json           # json | pretty, defaults by mode
//! RUSTCARE_REDACT_PII=true
//! RUSTCARE_HASH_FOR_CORRELATION=true
//! ```

pub mod config;
pub mod error;
pub mod redactor;
pub mod sink;
pub mod subscriber;

pub use config::*;
pub use error::*;
pub use redactor::*;
pub use sink::*;
pub use subscriber::*;
