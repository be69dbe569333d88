// crates/eventmi-core/src/core/wire_date.rs
// ============================================================================
// Module: Wire Date Format
// Description: `MM/dd/yyyy hh:mm tt` formatting and parsing for form fields.
// Purpose: Keep the Start/End serialization identical on both sides of HTTP.
// Dependencies: time, serde, thiserror
// ============================================================================

//! ## Overview
//! Form fields carry local wall-clock timestamps in a 12-hour layout such as
//! `12/12/2024 02:00 PM`. Parsing trims the value, accepts either designator
//! case, and tolerates whitespace after the hour/minute colon (`02: 00 PM`),
//! which older clients emitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;
use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Output layout: zero-padded 12-hour clock with an uppercase designator.
const WIRE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month]/[day]/[year] [hour repr:12]:[minute] [period]");

/// Input layout: same fields, case-insensitive designator.
const WIRE_PARSE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month]/[day]/[year] [hour repr:12]:[minute] [period case_sensitive:false]"
);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while converting wire dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireDateError {
    /// Input was empty after trimming.
    #[error("date value must not be empty")]
    Empty,
    /// Input did not match the wire layout.
    #[error("date value '{value}' does not match MM/dd/yyyy hh:mm tt: {reason}")]
    Parse {
        /// Offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Formatting failed.
    #[error("date formatting failed: {0}")]
    Format(String),
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Formats a timestamp for a form field.
///
/// # Errors
///
/// Returns [`WireDateError::Format`] when the timestamp cannot be rendered.
pub fn format_wire_date(value: PrimitiveDateTime) -> Result<String, WireDateError> {
    value.format(WIRE_FORMAT).map_err(|err| WireDateError::Format(err.to_string()))
}

/// Parses a form field timestamp.
///
/// # Errors
///
/// Returns [`WireDateError`] when the input is empty or malformed.
pub fn parse_wire_date(raw: &str) -> Result<PrimitiveDateTime, WireDateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WireDateError::Empty);
    }
    let normalized = collapse_colon_whitespace(trimmed);
    PrimitiveDateTime::parse(&normalized, WIRE_PARSE_FORMAT).map_err(|err| WireDateError::Parse {
        value: trimmed.to_string(),
        reason: err.to_string(),
    })
}

/// Removes whitespace that directly follows a `:` separator.
fn collapse_colon_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut after_colon = false;
    for ch in raw.chars() {
        if after_colon && ch.is_whitespace() {
            continue;
        }
        after_colon = ch == ':';
        out.push(ch);
    }
    out
}

// ============================================================================
// SECTION: Serde Adapter
// ============================================================================

/// Serde adapter storing timestamps in the wire layout.
pub mod serde_format {
    use super::Deserialize;
    use super::Deserializer;
    use super::PrimitiveDateTime;
    use super::Serializer;
    use super::format_wire_date;
    use super::parse_wire_date;

    /// Serializes a timestamp as a wire date string.
    ///
    /// # Errors
    ///
    /// Returns a serializer error when formatting fails.
    pub fn serialize<S: Serializer>(
        value: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = format_wire_date(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserializes a timestamp from a wire date string.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error when the string is malformed.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_wire_date(&text).map_err(serde::de::Error::custom)
    }
}
