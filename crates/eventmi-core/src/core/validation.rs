// crates/eventmi-core/src/core/validation.rs
// ============================================================================
// Module: Form Validation
// Description: Model-state validation for posted Event forms.
// Purpose: Decide between persisting a submission and redisplaying the form.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Validation collects every field error instead of stopping at the first, so
//! a redisplayed form can annotate all offending inputs at once.
//! Rules:
//! - `Name` and `Place` are required, non-blank, and at most
//!   [`MAX_TEXT_FIELD_CHARS`] characters after trimming.
//! - `Start` and `End` are required wire dates.
//! - `Start` must not be later than `End`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::event::NewEvent;
use crate::core::form::FormField;
use crate::core::form::FormSubmission;
use crate::core::wire_date::parse_wire_date;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of the `Name` and `Place` fields.
pub const MAX_TEXT_FIELD_CHARS: usize = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// Human-readable message.
    pub message: String,
}

/// All failed validation rules for a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", self.summary())]
pub struct ValidationErrors {
    /// Failed rules in field order.
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns true when the given field failed at least one rule.
    #[must_use]
    pub fn has_field(&self, field: FormField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Joins every failed rule as `Field: message`, separated by `; `.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|error| format!("{}: {}", error.field.as_str(), error.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Records a failed rule.
    fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}


// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a posted form and returns the contents to persist.
///
/// The `Id` field is not checked here; route/body identity agreement is a
/// routing concern of the edit handler.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every failed rule.
pub fn validate_submission(submission: &FormSubmission) -> Result<NewEvent, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = required_text(&mut errors, FormField::Name, submission.name.as_deref());
    let place = required_text(&mut errors, FormField::Place, submission.place.as_deref());
    let start = required_date(&mut errors, FormField::Start, submission.start.as_deref());
    let end = required_date(&mut errors, FormField::End, submission.end.as_deref());

    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        errors.push(FormField::End, "End must not be earlier than Start");
    }

    match (name, place, start, end) {
        (Some(name), Some(place), Some(start), Some(end)) if errors.errors.is_empty() => {
            Ok(NewEvent {
                name,
                place,
                start,
                end,
            })
        }
        _ => Err(errors),
    }
}

/// Checks a required text field and returns its trimmed value.
fn required_text(
    errors: &mut ValidationErrors,
    field: FormField,
    raw: Option<&str>,
) -> Option<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(field, format!("{} is required", field.as_str()));
        return None;
    }
    if trimmed.chars().count() > MAX_TEXT_FIELD_CHARS {
        errors.push(
            field,
            format!("{} must be at most {MAX_TEXT_FIELD_CHARS} characters", field.as_str()),
        );
        return None;
    }
    Some(trimmed.to_string())
}

/// Checks a required date field and returns the parsed timestamp.
fn required_date(
    errors: &mut ValidationErrors,
    field: FormField,
    raw: Option<&str>,
) -> Option<time::PrimitiveDateTime> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        errors.push(field, format!("{} is required", field.as_str()));
        return None;
    };
    match parse_wire_date(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(field, err.to_string());
            None
        }
    }
}
