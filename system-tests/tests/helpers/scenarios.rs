// system-tests/tests/helpers/scenarios.rs
// ============================================================================
// Module: Scenario Fixtures
// Description: Event form fixtures for system-tests.
// Purpose: Provide deterministic, uniquely named scenario rows.
// Dependencies: eventmi-core, time
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use eventmi_core::EventForm;
use eventmi_core::EventId;
use eventmi_core::NewEvent;
use time::macros::datetime;

/// Suffix appended to names by the full-edit scenario.
pub const UPDATED_SUFFIX: &str = " UPDATED!!!";

/// Returns `prefix` with a per-process unique suffix.
pub fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    format!("{prefix} {stamp}-{seq}")
}

/// Conference row posted by the add scenario.
pub fn conference(name: &str) -> NewEvent {
    NewEvent {
        name: name.to_string(),
        place: "Klub Burgas".to_string(),
        start: datetime!(2024-12-12 12:00),
        end: datetime!(2024-12-12 14:00),
    }
}

/// Complete add form for [`conference`].
pub fn conference_form(name: &str) -> EventForm {
    EventForm::from_new_event(&conference(name))
}

/// Row created and then removed by the delete scenario.
pub fn event_for_deleting() -> EventForm {
    conference_form(&unique_name("Event For Deleting"))
}

/// Seeded row identity used by the read-only details and edit-page scenarios.
pub const FIRST_EVENT_ID: i64 = 1;
/// Seeded row identity used by the mismatched-edit scenario.
pub const THIRD_EVENT_ID: i64 = 3;
/// Body identity that never matches the route in the mismatched-edit scenario.
pub const FOREIGN_BODY_ID: i64 = 445;

/// Converts a fixture identity into an [`EventId`].
pub fn event_id(raw: i64) -> Result<EventId, String> {
    EventId::from_raw(raw).ok_or_else(|| format!("invalid fixture id {raw}"))
}
