// Diagnostic reporting
// Records written for operators and the sink contract they are written to

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::codes::UNSPECIFIED_CONTEXT;
use crate::types::ErrorCategory;

/// One structured failure record, created per sanitized error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Unique id for correlating this record with a caller-visible failure
    pub record_id: Uuid,
    pub category: ErrorCategory,
    /// Call site or operation being attempted
    pub context: String,
    /// Point in time of the failure, serialized as RFC 3339
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Only present for API errors in development mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl DiagnosticRecord {
    pub fn new(
        category: ErrorCategory,
        context: &str,
        message: impl Into<String>,
        stack_trace: Option<String>,
    ) -> Self {
        let context = context.trim();
        Self {
            record_id: Uuid::new_v4(),
            category,
            context: if context.is_empty() {
                UNSPECIFIED_CONTEXT.to_string()
            } else {
                context.to_string()
            },
            timestamp: Utc::now(),
            message: message.into(),
            stack_trace,
        }
    }
}

/// Destination for diagnostic records.
///
/// Emitting is infallible from the caller's side; a sink that can fail must
/// deal with that itself.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, record: &DiagnosticRecord);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, record: &DiagnosticRecord) {
        (**self).emit(record);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn emit(&self, record: &DiagnosticRecord) {
        (**self).emit(record);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn emit(&self, record: &DiagnosticRecord) {
        (**self).emit(record);
    }
}

/// In-memory sink for testing/development
#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drain all records
    pub fn take(&self) -> Vec<DiagnosticRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl DiagnosticSink for InMemorySink {
    fn emit(&self, record: &DiagnosticRecord) {
        self.records.lock().push(record.clone());
    }
}
