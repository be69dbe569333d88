// crates/eventmi-core/src/interfaces/mod.rs
// ============================================================================
// Module: Eventmi Interfaces
// Description: Backend-agnostic interfaces for datastore observation.
// Purpose: Let test fixtures cross-check persisted rows without binding a driver.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The harness never writes to the datastore directly. It only reads rows back
//! to confirm what an HTTP write did, through the [`EventOracle`] trait.
//! Implementations must report missing rows as `Ok(None)` and reserve errors
//! for connectivity or corrupt data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::EventId;
use crate::core::EventRecord;

// ============================================================================
// SECTION: Event Oracle
// ============================================================================

/// Datastore oracle errors.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Oracle I/O error.
    #[error("event oracle io error: {0}")]
    Io(String),
    /// Persisted data could not be mapped onto an Event row.
    #[error("event oracle invalid data: {0}")]
    Invalid(String),
    /// Backend reported an error.
    #[error("event oracle error: {0}")]
    Store(String),
}

/// Read-only view of persisted Event rows.
pub trait EventOracle {
    /// Returns the first row with the given name, by ascending identity.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when the lookup fails.
    fn find_by_name(&self, name: &str) -> Result<Option<EventRecord>, OracleError>;

    /// Returns the row with the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when the lookup fails.
    fn find_by_id(&self, id: EventId) -> Result<Option<EventRecord>, OracleError>;

    /// Returns true when any row has the given name.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when the lookup fails.
    fn event_exists(&self, name: &str) -> Result<bool, OracleError> {
        Ok(self.find_by_name(name)?.is_some())
    }
}
