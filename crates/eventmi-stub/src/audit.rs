// crates/eventmi-stub/src/audit.rs
// ============================================================================
// Module: Stub Audit Logging
// Description: Structured audit events for requests served by the stub.
// Purpose: Emit JSON-line request logs from the reference application.
// Dependencies: axum, serde, serde_json
// ============================================================================

//! ## Overview
//! Every request handled by the stub produces one [`StubAuditEvent`] through
//! the [`audit_middleware`] layer. Form bodies are not logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::body::Body;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

use crate::app::FailureDetail;
use crate::app::StubState;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Served request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct StubAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Response status.
    pub status: u16,
    /// Handler duration in milliseconds.
    pub elapsed_ms: u128,
    /// Internal failure detail for `500` responses.
    pub error: Option<String>,
}

impl StubAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        method: String,
        path: String,
        status: u16,
        elapsed_ms: u128,
        error: Option<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "stub_request",
            timestamp_ms,
            method,
            path,
            status,
            elapsed_ms,
            error,
        }
    }

    /// Creates a `stub_server_error` event for a server loop that failed
    /// outside any single request.
    #[must_use]
    pub fn server_error(error: String) -> Self {
        Self {
            event: "stub_server_error",
            ..Self::new(String::new(), String::new(), 0, 0, Some(error))
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for served requests.
pub trait StubAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &StubAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrStubAuditSink;

impl StubAuditSink for StderrStubAuditSink {
    fn record(&self, event: &StubAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileStubAuditSink {
    /// Append-only log handle.
    file: Mutex<std::fs::File>,
}

impl FileStubAuditSink {
    /// Opens the audit log in append mode.
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

impl StubAuditSink for FileStubAuditSink {
    fn record(&self, event: &StubAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopStubAuditSink;

impl StubAuditSink for NoopStubAuditSink {
    fn record(&self, _event: &StubAuditEvent) {}
}

// ============================================================================
// SECTION: Middleware
// ============================================================================

/// Records one audit event per served request.
pub async fn audit_middleware(
    State(state): State<StubState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let error = response.extensions().get::<FailureDetail>().map(|detail| detail.0.clone());
    state.audit().record(&StubAuditEvent::new(
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis(),
        error,
    ));
    response
}
