//! Append-only audit sink for assumption and error records.
//!
//! The sink is an injected capability, not process-global state: the CLI
//! opens one per batch run, hands an `Arc<dyn AuditSink>` to each component,
//! and flushes it at run end. Records are single independent lines, so
//! concurrent writers from fan-out ticker tasks are safe.
//!
//! Line format: `<rfc3339 timestamp> <LEVEL> <message>`, with assumption
//! records carrying `ticker: Assumed field = value` as the message. The
//! engine only ever appends; nothing reads the log back.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::Symbol;

/// Record severity, mirrored in the emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl AuditLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Append-only audit capability shared across a batch run.
pub trait AuditSink: Send + Sync {
    /// Appends one record line.
    fn record(&self, level: AuditLevel, message: &str);

    /// Flushes buffered records to the backing store.
    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }

    /// Records a substituted default (ticker, field, assumed value).
    fn assumption(&self, symbol: &Symbol, field: &str, assumed: f64) {
        self.record(
            AuditLevel::Info,
            &format!("{symbol}: Assumed {field} = {assumed}"),
        );
    }

    fn warning(&self, message: &str) {
        self.record(AuditLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(AuditLevel::Error, message);
    }
}

fn format_line(level: AuditLevel, message: &str) -> String {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown-time"));
    format!("{timestamp} {} {message}", level.as_str())
}

/// File-backed sink appending one line per record.
pub struct FileAuditSink {
    writer: Mutex<BufWriter<std::fs::File>>,
}

impl FileAuditSink {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, level: AuditLevel, message: &str) {
        let line = format_line(level, message);
        let mut writer = self
            .writer
            .lock()
            .expect("audit writer should not be poisoned");
        // A full disk or revoked handle must not take the analysis down
        // with it; the record is simply lost.
        let _ = writeln!(writer, "{line}");
    }

    fn flush(&self) -> std::io::Result<()> {
        self.writer
            .lock()
            .expect("audit writer should not be poisoned")
            .flush()
    }
}

impl Drop for FileAuditSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .expect("audit lines should not be poisoned")
            .clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, level: AuditLevel, message: &str) {
        self.lines
            .lock()
            .expect("audit lines should not be poisoned")
            .push(format_line(level, message));
    }
}

/// Sink that drops every record.
#[derive(Debug, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _level: AuditLevel, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumption_records_ticker_field_and_value() {
        let sink = MemoryAuditSink::new();
        let symbol = Symbol::parse("AAPL").expect("valid");
        sink.assumption(&symbol, "growth_rate", 0.03);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("AAPL: Assumed growth_rate = 0.03"));
    }

    #[test]
    fn file_sink_appends_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("assumptions.log");

        let sink = FileAuditSink::open(&path).expect("open sink");
        sink.warning("first");
        sink.error("second");
        sink.flush().expect("flush");

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARNING first"));
        assert!(lines[1].contains("ERROR second"));
    }
}
