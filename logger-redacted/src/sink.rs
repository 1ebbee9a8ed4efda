use chrono::SecondsFormat;
use error_common::{DiagnosticRecord, DiagnosticSink};
use parking_lot::Mutex;
use std::io::{self, Write};

use crate::config::LoggerConfig;
use crate::redactor::{PiiRedactor, RedactionConfig};

/// Tracing target every diagnostic record is emitted under
pub const DIAGNOSTIC_TARGET: &str = "diagnostics";

/// Forwards records to the active `tracing` subscriber as error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, record: &DiagnosticRecord) {
        let timestamp = record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

        match &record.stack_trace {
            Some(stack_trace) => tracing::error!(
                target: DIAGNOSTIC_TARGET,
                record_id = %record.record_id,
                category = %record.category,
                context = %record.context,
                timestamp = %timestamp,
                stack_trace = %stack_trace,
                "{}",
                record.message
            ),
            None => tracing::error!(
                target: DIAGNOSTIC_TARGET,
                record_id = %record.record_id,
                category = %record.category,
                context = %record.context,
                timestamp = %timestamp,
                "{}",
                record.message
            ),
        }
    }
}

/// Writes one compact JSON object per record, newline terminated
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_record(&self, record: &DiagnosticRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        writer.flush()
    }
}

impl JsonLinesSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> DiagnosticSink for JsonLinesSink<W> {
    fn emit(&self, record: &DiagnosticRecord) {
        if let Err(e) = self.write_record(record) {
            tracing::warn!(
                record_id = %record.record_id,
                error = %e,
                "Failed to write diagnostic record"
            );
        }
    }
}

/// Scrubs PII from message and stack trace before handing the record on
pub struct RedactingSink<S> {
    inner: S,
    redactor: PiiRedactor,
}

impl<S: DiagnosticSink> RedactingSink<S> {
    pub fn new(inner: S, redactor: PiiRedactor) -> Self {
        Self { inner, redactor }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for RedactingSink<S> {
    fn emit(&self, record: &DiagnosticRecord) {
        let mut scrubbed = record.clone();
        scrubbed.message = self.redactor.redact(&record.message);
        scrubbed.stack_trace = record
            .stack_trace
            .as_deref()
            .map(|trace| self.redactor.redact(trace));
        self.inner.emit(&scrubbed);
    }
}

/// Default sink for a service: tracing output, redacted unless disabled
pub fn build_sink(config: &LoggerConfig) -> Box<dyn DiagnosticSink> {
    if config.redact_pii {
        let redaction = RedactionConfig::default().with_hashing(config.hash_for_correlation);
        Box::new(RedactingSink::new(TracingSink, PiiRedactor::new(redaction)))
    } else {
        Box::new(TracingSink)
    }
}
