// crates/eventmi-stub/src/seed.rs
// ============================================================================
// Module: Seed Rows
// Description: Demo rows and empty-store seeding.
// Purpose: Give a fresh datastore the rows the scenarios address by id.
// Dependencies: eventmi-core, eventmi-store-sqlite, time
// ============================================================================

//! ## Overview
//! Scenarios address rows `1` and `3` directly, so a fresh datastore needs at
//! least three rows. Seeding only runs against an empty `Events` table so a
//! restarted stub keeps its data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use eventmi_core::NewEvent;
use eventmi_store_sqlite::SqliteEventStore;
use eventmi_store_sqlite::SqliteStoreError;
use time::Date;
use time::Month;
use time::PrimitiveDateTime;
use time::Time;

// ============================================================================
// SECTION: Demo Rows
// ============================================================================

/// Demo rows in insertion order.
#[must_use]
pub fn demo_events() -> Vec<NewEvent> {
    [
        ("Softuniada 2024", "Sofia Tech Park", (2024, Month::March, 22), (9, 0), (18, 0)),
        ("OpenFest", "Sofia Event Center", (2024, Month::November, 2), (10, 0), (17, 30)),
        ("Burgas Dev Meetup", "Klub Burgas", (2024, Month::June, 14), (19, 0), (21, 0)),
    ]
    .into_iter()
    .filter_map(|(name, place, (year, month, day), start, end)| {
        let date = Date::from_calendar_date(year, month, day).ok()?;
        Some(NewEvent {
            name: name.to_string(),
            place: place.to_string(),
            start: at(date, start)?,
            end: at(date, end)?,
        })
    })
    .collect()
}

// ============================================================================
// SECTION: Seeding
// ============================================================================

/// Inserts `events` when the store holds no rows.
///
/// Returns the number of inserted rows.
///
/// # Errors
///
/// Returns [`SqliteStoreError`] when counting or inserting fails.
pub fn seed_if_empty(
    store: &SqliteEventStore,
    events: &[NewEvent],
) -> Result<usize, SqliteStoreError> {
    if store.count()? > 0 {
        return Ok(0);
    }
    for event in events {
        store.insert(event)?;
    }
    Ok(events.len())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Combines a date with an hour and minute.
fn at(date: Date, (hour, minute): (u8, u8)) -> Option<PrimitiveDateTime> {
    Time::from_hms(hour, minute, 0).ok().map(|time| PrimitiveDateTime::new(date, time))
}
