// system-tests/src/lib.rs
// ============================================================================
// Module: Eventmi System Tests Library
// Description: Shared configuration for the Event system-test suites.
// Purpose: Provide typed environment settings to system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts the environment-backed configuration used by the Event
//! system-test binaries in `system-tests/tests`. Suites target the in-process
//! stub unless an external application is configured.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
