// crates/eventmi-core/src/core/routes.rs
// ============================================================================
// Module: Event Routes
// Description: Route table for the Event resource.
// Purpose: Encode method, path, and expected status for every exercised route.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each [`EventRoute`] names one request shape the harness issues. The expected
//! status is the one the application returns for a well-formed request of that
//! shape; requests missing the id segment are expected to fail with 404
//! (details) or 500 (delete).
//!
//! | Route | Method | Expected |
//! |---|---|---|
//! | `/Event/All` | GET | 200 |
//! | `/Event/Add` | GET | 200 |
//! | `/Event/Add` | POST | 200 |
//! | `/Event/Details/{id}` | GET | 200 |
//! | `/Event/Details/` | GET | 404 |
//! | `/Event/Edit/{id}` | GET | 200 |
//! | `/Event/Edit/{id}` | POST | 200 |
//! | `/Event/Delete/{id}` | POST | 200 |
//! | `/Event/Delete/` | POST | 500 |

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::identifiers::EventId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path prefix shared by all Event routes.
pub const EVENT_RESOURCE_PREFIX: &str = "/Event";

// ============================================================================
// SECTION: Types
// ============================================================================

/// HTTP method used by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl HttpMethod {
    /// Returns the method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request shapes exercised against the Event resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRoute {
    /// List all events.
    All,
    /// Render the empty add form.
    AddPage,
    /// Submit the add form.
    AddSubmit,
    /// Show one event; `None` omits the id segment.
    Details(Option<EventId>),
    /// Render the edit form for an event.
    EditPage(EventId),
    /// Submit the edit form for an event.
    EditSubmit(EventId),
    /// Delete an event; `None` omits the id segment.
    Delete(Option<EventId>),
}

impl EventRoute {
    /// Returns the HTTP method for the route.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::All | Self::AddPage | Self::Details(_) | Self::EditPage(_) => HttpMethod::Get,
            Self::AddSubmit | Self::EditSubmit(_) | Self::Delete(_) => HttpMethod::Post,
        }
    }

    /// Returns the request path, relative to the application root.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::All => format!("{EVENT_RESOURCE_PREFIX}/All"),
            Self::AddPage | Self::AddSubmit => format!("{EVENT_RESOURCE_PREFIX}/Add"),
            Self::Details(id) => with_optional_id("Details", id),
            Self::EditPage(id) | Self::EditSubmit(id) => {
                format!("{EVENT_RESOURCE_PREFIX}/Edit/{id}")
            }
            Self::Delete(id) => with_optional_id("Delete", id),
        }
    }

    /// Returns the status a well-formed request of this shape produces.
    #[must_use]
    pub const fn expected_status(self) -> u16 {
        match self {
            Self::Details(None) => 404,
            Self::Delete(None) => 500,
            _ => 200,
        }
    }

    /// Returns true when the route carries a form body.
    #[must_use]
    pub const fn carries_form(self) -> bool {
        matches!(self, Self::AddSubmit | Self::EditSubmit(_))
    }

    /// Returns a stable label for transcripts and audit logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "event_all",
            Self::AddPage => "event_add_page",
            Self::AddSubmit => "event_add_submit",
            Self::Details(_) => "event_details",
            Self::EditPage(_) => "event_edit_page",
            Self::EditSubmit(_) => "event_edit_submit",
            Self::Delete(_) => "event_delete",
        }
    }
}

/// Builds `/Event/{action}/{id}` or `/Event/{action}/` when the id is absent.
fn with_optional_id(action: &str, id: Option<EventId>) -> String {
    id.map_or_else(
        || format!("{EVENT_RESOURCE_PREFIX}/{action}/"),
        |id| format!("{EVENT_RESOURCE_PREFIX}/{action}/{id}"),
    )
}
