// crates/eventmi-core/src/lib.rs
// ============================================================================
// Module: Eventmi Core Library
// Description: Public API surface for the Eventmi harness core.
// Purpose: Expose the Event model, wire formats, routes, and oracle interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Eventmi core describes the externally-owned Event resource as the HTTP
//! harness observes it: the persisted row shape, the form model submitted to
//! the application, the `MM/dd/yyyy hh:mm tt` wire date format, the route
//! table with expected status codes, and the read-only datastore oracle used
//! to cross-check write side effects.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EventOracle;
pub use interfaces::OracleError;
