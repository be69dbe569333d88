// crates/eventmi-stub/src/pages.rs
// ============================================================================
// Module: Stub Pages
// Description: Minimal HTML views for the Event routes.
// Purpose: Render listing, details, form, and error pages.
// Dependencies: eventmi-core
// ============================================================================

//! ## Overview
//! Pages are plain HTML strings. Every user-supplied value is escaped. Forms
//! post the same field names the client sends (`Id`, `Name`, `Place`, `Start`,
//! `End`) and echo back what was submitted when redisplayed.

use std::fmt::Write as _;

use eventmi_core::EventRecord;
use eventmi_core::FormField;
use eventmi_core::FormSubmission;
use eventmi_core::ValidationErrors;
use eventmi_core::format_wire_date;

/// Renders the event listing.
#[must_use]
pub fn render_list(events: &[EventRecord]) -> String {
    let mut rows = String::new();
    for event in events {
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>{place}</td><td>{start}</td><td>{end}</td>\
             <td><a href=\"/Event/Details/{id}\">Details</a> \
             <a href=\"/Event/Edit/{id}\">Edit</a> \
             <form method=\"post\" action=\"/Event/Delete/{id}\"><button>Delete</button></form>\
             </td></tr>",
            id = event.id,
            name = escape_html(&event.name),
            place = escape_html(&event.place),
            start = wire_or_blank(event.start),
            end = wire_or_blank(event.end),
        );
    }
    layout(
        "All Events",
        &format!(
            "<a href=\"/Event/Add\">Add</a><table><thead><tr><th>Id</th><th>Name</th>\
             <th>Place</th><th>Start</th><th>End</th><th></th></tr></thead>\
             <tbody>{rows}</tbody></table>"
        ),
    )
}

/// Renders a single event.
#[must_use]
pub fn render_details(event: &EventRecord) -> String {
    layout(
        "Event Details",
        &format!(
            "<dl><dt>Id</dt><dd>{id}</dd><dt>Name</dt><dd>{name}</dd>\
             <dt>Place</dt><dd>{place}</dd><dt>Start</dt><dd>{start}</dd>\
             <dt>End</dt><dd>{end}</dd></dl><a href=\"/Event/All\">Back</a>",
            id = event.id,
            name = escape_html(&event.name),
            place = escape_html(&event.place),
            start = wire_or_blank(event.start),
            end = wire_or_blank(event.end),
        ),
    )
}

/// Renders the add or edit form with optional validation messages.
#[must_use]
pub fn render_form(
    title: &str,
    action: &str,
    values: &FormSubmission,
    errors: Option<&ValidationErrors>,
) -> String {
    let mut body = format!("<form method=\"post\" action=\"{}\">", escape_html(action));
    if let Some(errors) = errors {
        body.push_str("<ul class=\"validation-summary-errors\">");
        for error in &errors.errors {
            let _ = write!(
                body,
                "<li data-field=\"{}\">{}</li>",
                error.field.as_str(),
                escape_html(&error.message)
            );
        }
        body.push_str("</ul>");
    }
    if let Some(id) = &values.id {
        let _ = write!(
            body,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            FormField::Id.as_str(),
            escape_html(id)
        );
    }
    for (field, value) in [
        (FormField::Name, &values.name),
        (FormField::Place, &values.place),
        (FormField::Start, &values.start),
        (FormField::End, &values.end),
    ] {
        let _ = write!(
            body,
            "<label>{name}<input name=\"{name}\" value=\"{value}\"></label>",
            name = field.as_str(),
            value = escape_html(value.as_deref().unwrap_or_default()),
        );
    }
    body.push_str("<button type=\"submit\">Save</button></form>");
    layout(title, &body)
}

/// Builds a form submission pre-filled from a persisted row.
#[must_use]
pub fn submission_from_record(event: &EventRecord) -> FormSubmission {
    FormSubmission {
        id: Some(event.id.to_string()),
        name: Some(event.name.clone()),
        place: Some(event.place.clone()),
        start: format_wire_date(event.start).ok(),
        end: format_wire_date(event.end).ok(),
    }
}

/// Renders the not-found page.
#[must_use]
pub fn render_not_found() -> String {
    layout("Not Found", "<p>The requested event was not found.</p>")
}

/// Renders the server error page.
#[must_use]
pub fn render_server_error() -> String {
    layout("Error", "<p>An error occurred while processing your request.</p>")
}

/// Escapes text for inclusion in HTML content and attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps a body in the shared page layout.
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title} - Eventmi</title>\
         </head><body><h1>{title}</h1>{body}</body></html>"
    )
}

/// Formats a timestamp for display, blank when it cannot be formatted.
fn wire_or_blank(value: time::PrimitiveDateTime) -> String {
    format_wire_date(value).unwrap_or_default()
}
