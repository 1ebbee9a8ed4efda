//! End-to-end checks for the three sanitizing handlers
//!
//! Tests cover:
//! - The four reference scenarios (patient search, export job, auth, audit sweep)
//! - Redaction properties over generated messages
//! - Record emission ordering and stack trace gating by execution mode

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use error_common::{
    handle_api_error, handle_compliance_error, handle_security_error, DiagnosticRecord,
    DiagnosticSink, ErrorCategory, ErrorSanitizer, ExecutionMode, InMemorySink, SanitizedError,
    TracedError,
};
use proptest::prelude::*;

// =============================================================================
// REFERENCE SCENARIOS
// =============================================================================

#[test]
fn test_api_error_passthrough_in_production() {
    let sink = InMemorySink::new();
    let before = Utc::now();

    let err = handle_api_error(
        TracedError::captured("lookup failed for record"),
        "patient-search",
        &sink,
        ExecutionMode::Production,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "lookup failed for record");
    assert!(matches!(err, SanitizedError::Passthrough(_)));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category, ErrorCategory::Api);
    assert_eq!(record.context, "patient-search");
    assert_eq!(record.message, "lookup failed for record");
    assert_eq!(record.stack_trace, None);
    assert!(record.timestamp >= before && record.timestamp <= Utc::now());
}

#[test]
fn test_api_error_with_phi_marker_is_redacted() {
    let sink = InMemorySink::new();

    let err = handle_api_error(
        TracedError::new("PHI leak detected in export"),
        "export-job",
        &sink,
        ExecutionMode::Production,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Healthcare data processing error");
    assert!(err.original().is_none());

    // The log keeps the original text for operators
    assert_eq!(sink.records()[0].message, "PHI leak detected in export");
}

#[test]
fn test_security_error_logs_marker_only() {
    let sink = InMemorySink::new();

    let err = handle_security_error(
        TracedError::captured("token replay attempt"),
        "auth-middleware",
        &sink,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Security validation failed");

    let record = &sink.records()[0];
    assert_eq!(record.category, ErrorCategory::Security);
    assert_eq!(record.context, "auth-middleware");
    assert_eq!(record.message, "Security incident detected");
    assert_eq!(record.stack_trace, None);

    let json = serde_json::to_string(record).unwrap();
    assert!(!json.contains("token replay"));
}

#[test]
fn test_compliance_error_logs_marker_only() {
    let sink = InMemorySink::new();

    let err = handle_compliance_error(
        TracedError::new("retention policy breach"),
        "audit-sweep",
        &sink,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Compliance validation failed");

    let record = &sink.records()[0];
    assert_eq!(record.category, ErrorCategory::Compliance);
    assert_eq!(record.message, "Compliance violation detected");
    assert!(!serde_json::to_string(record).unwrap().contains("retention"));
}

// =============================================================================
// ORDERING AND MODE
// =============================================================================

/// Sink that asserts nothing has been returned to the caller yet
struct OrderingSink {
    emitted: InMemorySink,
}

impl DiagnosticSink for OrderingSink {
    fn emit(&self, record: &DiagnosticRecord) {
        assert!(self.emitted.is_empty(), "each call must emit exactly one record");
        self.emitted.emit(record);
    }
}

#[test]
fn test_exactly_one_record_before_failure() {
    for category in [ErrorCategory::Api, ErrorCategory::Security, ErrorCategory::Compliance] {
        let sink = OrderingSink {
            emitted: InMemorySink::new(),
        };
        let error = TracedError::new("boom");

        let result = match category {
            ErrorCategory::Api => handle_api_error(error, "ctx", &sink, ExecutionMode::Development),
            ErrorCategory::Security => handle_security_error(error, "ctx", &sink),
            ErrorCategory::Compliance => handle_compliance_error(error, "ctx", &sink),
        };

        // The record is already there by the time the failure comes back
        assert_eq!(sink.emitted.len(), 1);
        assert_eq!(sink.emitted.records()[0].category, category);
        assert_eq!(result.unwrap_err().category(), category);
    }
}

#[test]
fn test_stack_trace_only_in_development() {
    let error = || TracedError::captured("lookup failed for record");

    let production = InMemorySink::new();
    let _ = handle_api_error(error(), "patient-search", &production, ExecutionMode::Production);
    assert!(production.records()[0].stack_trace.is_none());

    let development = InMemorySink::new();
    let _ = handle_api_error(error(), "patient-search", &development, ExecutionMode::Development);
    assert!(development.records()[0].stack_trace.is_some());

    // Security never carries a trace, whatever the mode
    let sanitizer = ErrorSanitizer::new(InMemorySink::new(), ExecutionMode::Development);
    let _ = sanitizer.security(error(), "auth-middleware");
    assert!(sanitizer.sink().records()[0].stack_trace.is_none());
}

#[test]
fn test_question_mark_propagation_in_handler() {
    fn load_patient(
        sanitizer: &ErrorSanitizer<Arc<InMemorySink>>,
        id: &str,
    ) -> Result<String, SanitizedError<TracedError>> {
        if id.is_empty() {
            sanitizer.api(TracedError::new("missing sensitive identifier"), "patient-load")?;
        }
        Ok(format!("patient {id}"))
    }

    let sink = Arc::new(InMemorySink::new());
    let sanitizer = ErrorSanitizer::new(Arc::clone(&sink), ExecutionMode::Production);

    assert_eq!(load_patient(&sanitizer, "42").unwrap(), "patient 42");
    assert!(sink.is_empty());

    let err = load_patient(&sanitizer, "").unwrap_err();
    assert_eq!(err.to_string(), "Healthcare data processing error");
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_concurrent_callers_are_independent() {
    let sink = Arc::new(InMemorySink::new());
    let sanitizer = ErrorSanitizer::new(Arc::clone(&sink), ExecutionMode::Production);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let sanitizer = sanitizer.clone();
            thread::spawn(move || {
                for call in 0..25 {
                    let context = format!("worker-{worker}-{call}");
                    let err = sanitizer
                        .api(TracedError::new(format!("failure {call}")), &context)
                        .unwrap_err();
                    assert_eq!(err.to_string(), format!("failure {call}"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let records = sink.records();
    assert_eq!(records.len(), 200);
    let mut ids: Vec<_> = records.iter().map(|r| r.record_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_anyhow_errors_are_accepted() {
    let sink = InMemorySink::new();
    let err = handle_api_error(
        anyhow::anyhow!("upstream timeout"),
        "claims-sync",
        &sink,
        ExecutionMode::Production,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "upstream timeout");
    assert_eq!(sink.records()[0].message, "upstream timeout");
}

#[test]
fn test_timestamp_is_iso8601() {
    let sink = InMemorySink::new();
    let _ = handle_compliance_error((), "audit-sweep", &sink);

    let json = serde_json::to_value(&sink.records()[0]).unwrap();
    let raw = json["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(raw).is_ok());
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn message_with_marker() -> impl Strategy<Value = String> {
    ("[ -~]{0,40}", prop_oneof![Just("PHI"), Just("sensitive")], "[ -~]{0,40}")
        .prop_map(|(prefix, marker, suffix)| format!("{prefix}{marker}{suffix}"))
}

fn message_without_marker() -> impl Strategy<Value = String> {
    "[ -~]{0,80}".prop_filter("no sensitive marker", |message| {
        !message.contains("PHI") && !message.contains("sensitive")
    })
}

proptest! {
    #[test]
    fn prop_marked_api_errors_are_redacted(message in message_with_marker()) {
        let sink = InMemorySink::new();
        let err = handle_api_error(TracedError::new(message.clone()), "ctx", &sink, ExecutionMode::Production)
            .unwrap_err();

        let records = sink.records();
        prop_assert_eq!(err.to_string(), "Healthcare data processing error");
        prop_assert_eq!(&records[0].message, &message);
    }

    #[test]
    fn prop_unmarked_api_errors_pass_through(message in message_without_marker(), trace in "[a-z:() ]{1,30}") {
        let sink = InMemorySink::new();
        let original = TracedError::with_stack_trace(message.clone(), trace);
        let err = handle_api_error(original.clone(), "ctx", &sink, ExecutionMode::Production)
            .unwrap_err();

        prop_assert_eq!(err.to_string(), message);
        prop_assert_eq!(err.into_original(), Some(original));
    }

    #[test]
    fn prop_security_message_is_fixed(message in any::<String>(), context in "[a-z-]{1,20}") {
        let sink = InMemorySink::new();
        let err = handle_security_error(TracedError::new(message), &context, &sink).unwrap_err();

        let records = sink.records();
        prop_assert_eq!(err.to_string(), "Security validation failed");
        prop_assert_eq!(records[0].message.as_str(), "Security incident detected");
    }

    #[test]
    fn prop_compliance_message_is_fixed(message in any::<String>()) {
        let sink = InMemorySink::new();
        let err = handle_compliance_error(TracedError::new(message), "audit-sweep", &sink).unwrap_err();

        prop_assert_eq!(err.to_string(), "Compliance validation failed");
        prop_assert_eq!(sink.len(), 1);
    }
}
