//! Per-request access logging for the origins.
//!
//! One line per request, written before the response is produced:
//! `[<ISO-8601 timestamp>] [<label>] <METHOD> <path+query>`.
//! The sink is a trait object so embedders and tests can capture lines
//! without touching process-wide output.

use std::fmt;
use std::sync::{Arc, Mutex};

use axum::http::{Method, Uri};
use chrono::{DateTime, SecondsFormat, Utc};

/// A single access log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub timestamp: DateTime<Utc>,
    pub label: Arc<str>,
    pub method: Method,
    pub uri: Uri,
}

impl AccessEntry {
    pub fn now(label: Arc<str>, method: Method, uri: Uri) -> Self {
        Self {
            timestamp: Utc::now(),
            label,
            method,
            uri,
        }
    }
}

impl fmt::Display for AccessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.label,
            self.method,
            self.uri
        )
    }
}

/// Destination for access log records.
pub trait AccessLog: Send + Sync {
    fn record(&self, entry: &AccessEntry);
}

/// Writes access lines through `tracing` on the `access` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAccessLog;

impl AccessLog for TracingAccessLog {
    fn record(&self, entry: &AccessEntry) {
        tracing::info!(target: "access", "{entry}");
    }
}

/// Keeps formatted access lines in memory.
#[derive(Debug, Default)]
pub struct MemoryAccessLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryAccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl AccessLog for MemoryAccessLog {
    fn record(&self, entry: &AccessEntry) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(entry.to_string());
        }
    }
}
