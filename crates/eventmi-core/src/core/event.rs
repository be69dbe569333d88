// crates/eventmi-core/src/core/event.rs
// ============================================================================
// Module: Event Records
// Description: Persisted Event row and validated insert payload.
// Purpose: Describe the externally-owned entity the harness observes.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! An Event row is `{ Id, Name, Place, Start, End }`. The identity is assigned
//! by the datastore on insert and immutable afterwards; edits replace the
//! remaining four columns wholesale.
//! Invariants:
//! - `start <= end` for rows written through validated forms. Rows read from
//!   an external datastore are reported as-is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::core::identifiers::EventId;
use crate::core::wire_date::serde_format;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Persisted Event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Datastore identity.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Venue.
    pub place: String,
    /// Start timestamp (local wall clock).
    #[serde(with = "serde_format")]
    pub start: PrimitiveDateTime,
    /// End timestamp (local wall clock).
    #[serde(with = "serde_format")]
    pub end: PrimitiveDateTime,
}

impl EventRecord {
    /// Returns the row contents without its identity.
    #[must_use]
    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            name: self.name.clone(),
            place: self.place.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// Validated Event contents ready to insert or replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Display name.
    pub name: String,
    /// Venue.
    pub place: String,
    /// Start timestamp (local wall clock).
    #[serde(with = "serde_format")]
    pub start: PrimitiveDateTime,
    /// End timestamp (local wall clock).
    #[serde(with = "serde_format")]
    pub end: PrimitiveDateTime,
}

impl NewEvent {
    /// Attaches a datastore identity.
    #[must_use]
    pub fn with_id(self, id: EventId) -> EventRecord {
        EventRecord {
            id,
            name: self.name,
            place: self.place,
            start: self.start,
            end: self.end,
        }
    }
}
