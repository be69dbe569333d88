// crates/eventmi-stub/src/lib.rs
// ============================================================================
// Module: Eventmi Stub Library
// Description: Reference Event web application served over HTTP.
// Purpose: Give the system tests a hermetic target with known semantics.
// Dependencies: axum, eventmi-core, eventmi-store-sqlite, tokio, toml
// ============================================================================

//! ## Overview
//! The stub serves the five `/Event` routes over plain HTTP on top of a
//! [`eventmi_store_sqlite::SqliteEventStore`]. Successful writes answer with a
//! `302 Found` to `/Event/All`; invalid forms are redisplayed with `200`;
//! unknown rows are `404` except for deletes, which fail with `500`.
//! [`spawn_stub`] runs the application on an ephemeral loopback port in a
//! background thread; [`serve`] runs it in the foreground for the binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod app;
pub mod audit;
pub mod config;
pub mod pages;
pub mod seed;
pub mod server;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use app::StubState;
pub use app::build_router;
pub use audit::FileStubAuditSink;
pub use audit::NoopStubAuditSink;
pub use audit::StderrStubAuditSink;
pub use audit::StubAuditEvent;
pub use audit::StubAuditSink;
pub use config::AuditConfig;
pub use config::ConfigError;
pub use config::SeedEvent;
pub use config::StubConfig;
pub use seed::demo_events;
pub use seed::seed_if_empty;
pub use server::StubError;
pub use server::StubServerHandle;
pub use server::build_audit_sink;
pub use server::serve;
pub use server::spawn_stub;
