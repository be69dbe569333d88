// crates/eventmi-client/src/lib.rs
// ============================================================================
// Module: Eventmi HTTP Client
// Description: Form-encoded HTTP client for the Event resource.
// Purpose: Issue one request per route and report the observed status.
// Dependencies: eventmi-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`EventmiHttpClient`] sends the requests listed in
//! [`eventmi_core::EventRoute`] against a base address and returns each
//! exchange's final status. Redirects are followed, so a successful write that
//! redirects to the listing is observed as `200`. There are no retries: one
//! call is one exchange. Every exchange is appended to an in-memory transcript
//! and reported to a [`RequestAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ExchangeOutcome;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestAuditEventParams;
pub use audit::RequestAuditSink;
pub use audit::StderrAuditSink;
pub use client::ClientConfig;
pub use client::ClientError;
pub use client::EventmiHttpClient;
pub use client::HttpExchange;
pub use client::TranscriptEntry;
