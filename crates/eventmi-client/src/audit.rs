// crates/eventmi-client/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for HTTP exchanges.
// Purpose: Emit JSON-line request logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each HTTP exchange produces one [`RequestAuditEvent`]. Sinks decide where
//! the event goes; the stderr and file sinks write one JSON object per line so
//! CI logs can be grepped or parsed line by line. Request bodies are never
//! logged, only their size.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeOutcome {
    /// A response was received (any status).
    Response,
    /// The request failed before a response arrived.
    TransportError,
}

/// HTTP exchange audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Client-local sequence number.
    pub sequence: u64,
    /// Route label.
    pub route: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Request path.
    pub path: String,
    /// Final response status when a response arrived.
    pub status: Option<u16>,
    /// Exchange outcome.
    pub outcome: ExchangeOutcome,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u128,
    /// Encoded request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Transport error message when the exchange failed.
    pub error: Option<String>,
}

/// Inputs required to construct a request audit event.
pub struct RequestAuditEventParams {
    /// Client-local sequence number.
    pub sequence: u64,
    /// Route label.
    pub route: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Request path.
    pub path: String,
    /// Final response status when a response arrived.
    pub status: Option<u16>,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u128,
    /// Encoded request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Transport error message when the exchange failed.
    pub error: Option<String>,
}

impl RequestAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome = if params.status.is_some() {
            ExchangeOutcome::Response
        } else {
            ExchangeOutcome::TransportError
        };
        Self {
            event: "http_exchange",
            timestamp_ms,
            sequence: params.sequence,
            route: params.route,
            method: params.method,
            path: params.path,
            status: params.status,
            outcome,
            elapsed_ms: params.elapsed_ms,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
            error: params.error,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for HTTP exchange events.
pub trait RequestAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl RequestAuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RequestAuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl RequestAuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}
