// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Event system-tests.
// Purpose: Provide target selection, fixtures, and artifact utilities.
// Dependencies: system-tests, eventmi-client, eventmi-stub
// ============================================================================

//! ## Overview
//! Shared helpers for Event system-tests.
//! Invariants:
//! - Each test owns its target; the in-process stub never outlives its test.
//! - Scenario rows carry unique names so tests sharing an external datastore
//!   do not observe each other's rows.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod harness;
pub mod readiness;
pub mod scenarios;
pub mod timeouts;
