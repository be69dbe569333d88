// crates/eventmi-core/src/core/form.rs
// ============================================================================
// Module: Event Forms
// Description: Typed and raw views of the Event HTML form.
// Purpose: Encode outgoing form bodies and decode incoming ones.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! [`EventForm`] is what a client fills in: every field is optional so
//! partially-filled submissions can be expressed. [`FormSubmission`] is what a
//! server receives: raw strings exactly as decoded from
//! `application/x-www-form-urlencoded`, before any validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::core::event::EventRecord;
use crate::core::event::NewEvent;
use crate::core::identifiers::EventId;
use crate::core::wire_date::WireDateError;
use crate::core::wire_date::format_wire_date;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Form field names as posted by the application's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FormField {
    /// Row identity (edit form only).
    Id,
    /// Display name.
    Name,
    /// Venue.
    Place,
    /// Start timestamp.
    Start,
    /// End timestamp.
    End,
}

impl FormField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::Place => "Place",
            Self::Start => "Start",
            Self::End => "End",
        }
    }
}

// ============================================================================
// SECTION: Typed Form
// ============================================================================

/// Client-side Event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    /// Row identity posted with edits.
    pub id: Option<EventId>,
    /// Display name.
    pub name: Option<String>,
    /// Venue.
    pub place: Option<String>,
    /// Start timestamp.
    pub start: Option<PrimitiveDateTime>,
    /// End timestamp.
    pub end: Option<PrimitiveDateTime>,
}

impl EventForm {
    /// Builds a complete add form from event contents.
    #[must_use]
    pub fn from_new_event(event: &NewEvent) -> Self {
        Self {
            id: None,
            name: Some(event.name.clone()),
            place: Some(event.place.clone()),
            start: Some(event.start),
            end: Some(event.end),
        }
    }

    /// Builds a complete edit form from a persisted row.
    #[must_use]
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: Some(record.id),
            name: Some(record.name.clone()),
            place: Some(record.place.clone()),
            start: Some(record.start),
            end: Some(record.end),
        }
    }

    /// Replaces the posted identity.
    #[must_use]
    pub const fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces the posted name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Encodes the form as ordered `(field, value)` pairs, skipping absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`WireDateError`] when a timestamp cannot be formatted.
    pub fn to_pairs(&self) -> Result<Vec<(&'static str, String)>, WireDateError> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(id) = self.id {
            pairs.push((FormField::Id.as_str(), id.to_string()));
        }
        if let Some(name) = &self.name {
            pairs.push((FormField::Name.as_str(), name.clone()));
        }
        if let Some(place) = &self.place {
            pairs.push((FormField::Place.as_str(), place.clone()));
        }
        if let Some(start) = self.start {
            pairs.push((FormField::Start.as_str(), format_wire_date(start)?));
        }
        if let Some(end) = self.end {
            pairs.push((FormField::End.as_str(), format_wire_date(end)?));
        }
        Ok(pairs)
    }
}

// ============================================================================
// SECTION: Raw Submission
// ============================================================================

/// Server-side view of a posted Event form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Raw `Id` field.
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    /// Raw `Name` field.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Raw `Place` field.
    #[serde(rename = "Place", default)]
    pub place: Option<String>,
    /// Raw `Start` field.
    #[serde(rename = "Start", default)]
    pub start: Option<String>,
    /// Raw `End` field.
    #[serde(rename = "End", default)]
    pub end: Option<String>,
}

impl FormSubmission {
    /// Returns the posted identity when it parses as an [`EventId`].
    #[must_use]
    pub fn posted_id(&self) -> Option<EventId> {
        self.id.as_deref().and_then(|raw| raw.parse().ok())
    }
}
