// crates/eventmi-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Event Store
// Description: Event datastore backend using SQLite.
// Purpose: Persist Event rows for the reference application and read them
//          back as a test oracle.
// Dependencies: eventmi-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides [`SqliteEventStore`], which owns the `Events` table used
//! by the reference application and implements
//! [`eventmi_core::EventOracle`] so system tests can cross-check HTTP writes.
//! Oracle handles opened with [`SqliteEventStore::open_read_only`] never create
//! or migrate schema, so they are safe to point at a datastore owned by an
//! external application.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteEventStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
