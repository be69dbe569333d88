// crates/eventmi-core/src/core/identifiers.rs
// ============================================================================
// Module: Eventmi Identifiers
// Description: Datastore identity for Event rows.
// Purpose: Provide a strongly typed, non-zero event identifier.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Event identifiers are assigned by the datastore on insert and never change
//! afterwards. Identity columns start at one, so zero is rejected at parse
//! time rather than carried around as a sentinel.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing an event identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventIdError {
    /// Identifier text was empty after trimming.
    #[error("event id must not be empty")]
    Empty,
    /// Identifier text was not an unsigned integer.
    #[error("event id must be an unsigned integer: {0}")]
    NotNumeric(String),
    /// Identifier was zero.
    #[error("event id must be greater than zero")]
    Zero,
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identity of a persisted Event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(NonZeroU64);

impl EventId {
    /// Creates an identifier from a non-zero value.
    #[must_use]
    pub const fn new(value: NonZeroU64) -> Self {
        Self(value)
    }

    /// Creates an identifier from a raw datastore value.
    ///
    /// Returns `None` for zero or negative values.
    #[must_use]
    pub fn from_raw(value: i64) -> Option<Self> {
        u64::try_from(value).ok().and_then(NonZeroU64::new).map(Self)
    }

    /// Returns the identifier as an unsigned integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns the identifier as a signed datastore value.
    ///
    /// Returns `None` when the value exceeds the `SQLite` integer range.
    #[must_use]
    pub fn to_sql(self) -> Option<i64> {
        i64::try_from(self.0.get()).ok()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = EventIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EventIdError::Empty);
        }
        let value: u64 =
            trimmed.parse().map_err(|_| EventIdError::NotNumeric(trimmed.to_string()))?;
        NonZeroU64::new(value).map(Self).ok_or(EventIdError::Zero)
    }
}

impl From<NonZeroU64> for EventId {
    fn from(value: NonZeroU64) -> Self {
        Self::new(value)
    }
}
