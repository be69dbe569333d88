// crates/eventmi-core/src/core/mod.rs
// ============================================================================
// Module: Eventmi Core Types
// Description: Data model and wire contract for the Event resource.
// Purpose: Group identifiers, records, forms, dates, routes, and validation.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Core types shared by the HTTP client, the datastore oracle, and the
//! reference application.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod event;
pub mod form;
pub mod identifiers;
pub mod routes;
pub mod validation;
pub mod wire_date;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use event::EventRecord;
pub use event::NewEvent;
pub use form::EventForm;
pub use form::FormField;
pub use form::FormSubmission;
pub use identifiers::EventId;
pub use identifiers::EventIdError;
pub use routes::EVENT_RESOURCE_PREFIX;
pub use routes::EventRoute;
pub use routes::HttpMethod;
pub use validation::FieldError;
pub use validation::MAX_TEXT_FIELD_CHARS;
pub use validation::ValidationErrors;
pub use validation::validate_submission;
pub use wire_date::WireDateError;
pub use wire_date::format_wire_date;
pub use wire_date::parse_wire_date;
