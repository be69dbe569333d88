// crates/eventmi-stub/src/app.rs
// ============================================================================
// Module: Stub Application
// Description: axum router and handlers for the Event routes.
// Purpose: Implement list, add, details, edit, and delete over the store.
// Dependencies: axum, eventmi-core, eventmi-store-sqlite
// ============================================================================

//! ## Overview
//! Route table:
//!
//! | Method | Path                 | Outcome                                   |
//! |--------|----------------------|-------------------------------------------|
//! | GET    | `/Event/All`         | `200` listing                             |
//! | GET    | `/Event/Add`         | `200` empty form                          |
//! | POST   | `/Event/Add`         | `302` to listing, or `200` redisplay      |
//! | GET    | `/Event/Details/{id}`| `200`, or `404` when absent               |
//! | GET    | `/Event/Edit/{id}`   | `200`, or `404` when absent               |
//! | POST   | `/Event/Edit/{id}`   | `302`, `200` redisplay, or `404`          |
//! | POST   | `/Event/Delete/{id}` | `302`, or `500` when absent               |
//!
//! `POST /Event/Delete/` without an id is `500`. Everything else is `404`,
//! including known paths requested with the wrong method. Bodies that are not
//! form-encoded bind as an empty submission.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Form;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::middleware;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use eventmi_core::EventId;
use eventmi_core::FormSubmission;
use eventmi_core::validate_submission;
use eventmi_store_sqlite::SqliteEventStore;
use eventmi_store_sqlite::SqliteStoreError;

use crate::audit::StubAuditSink;
use crate::audit::audit_middleware;
use crate::pages::render_details;
use crate::pages::render_form;
use crate::pages::render_list;
use crate::pages::render_not_found;
use crate::pages::render_server_error;
use crate::pages::submission_from_record;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Redirect target after successful writes.
const LISTING_PATH: &str = "/Event/All";
/// Add form action.
const ADD_PATH: &str = "/Event/Add";

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared handler state.
#[derive(Clone)]
pub struct StubState {
    /// Event datastore.
    store: Arc<SqliteEventStore>,
    /// Request audit sink.
    audit: Arc<dyn StubAuditSink>,
}

impl StubState {
    /// Creates handler state.
    #[must_use]
    pub fn new(store: Arc<SqliteEventStore>, audit: Arc<dyn StubAuditSink>) -> Self {
        Self {
            store,
            audit,
        }
    }

    /// Returns the datastore.
    #[must_use]
    pub fn store(&self) -> &SqliteEventStore {
        &self.store
    }

    /// Returns the audit sink.
    #[must_use]
    pub fn audit(&self) -> &dyn StubAuditSink {
        self.audit.as_ref()
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Failure detail attached to `500` responses for the audit layer.
#[derive(Debug, Clone)]
pub struct FailureDetail(pub String);

/// Handler failure rendered as `500`.
#[derive(Debug)]
struct HandlerFailure(String);

impl From<SqliteStoreError> for HandlerFailure {
    fn from(err: SqliteStoreError) -> Self {
        Self(err.to_string())
    }
}

impl IntoResponse for HandlerFailure {
    fn into_response(self) -> Response {
        server_error(self.0)
    }
}

/// Handler result type.
type HandlerResult = Result<Response, HandlerFailure>;

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the stub router with audit logging applied to every route.
pub fn build_router(state: StubState) -> Router {
    Router::new()
        .route("/Event/All", get(list_events))
        .route(ADD_PATH, get(add_page).post(add_submit))
        .route("/Event/Details/{id}", get(details))
        .route("/Event/Edit/{id}", get(edit_page).post(edit_submit))
        .route("/Event/Delete", post(delete_without_id))
        .route("/Event/Delete/", post(delete_without_id))
        .route("/Event/Delete/{id}", post(delete_event))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), audit_middleware))
        .with_state(state)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// GET `/Event/All`.
async fn list_events(State(state): State<StubState>) -> HandlerResult {
    let events = state.store().list()?;
    Ok(Html(render_list(&events)).into_response())
}

/// GET `/Event/Add`.
async fn add_page() -> Response {
    Html(render_form("Add Event", ADD_PATH, &FormSubmission::default(), None)).into_response()
}

/// POST `/Event/Add`.
async fn add_submit(
    State(state): State<StubState>,
    form: Result<Form<FormSubmission>, FormRejection>,
) -> HandlerResult {
    let submission = bind_submission(form);
    match validate_submission(&submission) {
        Ok(event) => {
            state.store().insert(&event)?;
            Ok(redirect_to_listing())
        }
        Err(errors) => {
            Ok(Html(render_form("Add Event", ADD_PATH, &submission, Some(&errors)))
                .into_response())
        }
    }
}

/// GET `/Event/Details/{id}`.
async fn details(State(state): State<StubState>, Path(raw): Path<String>) -> HandlerResult {
    let Ok(id) = raw.parse::<EventId>() else {
        return Ok(not_found_response());
    };
    match state.store().get(id)? {
        Some(event) => Ok(Html(render_details(&event)).into_response()),
        None => Ok(not_found_response()),
    }
}

/// GET `/Event/Edit/{id}`.
async fn edit_page(State(state): State<StubState>, Path(raw): Path<String>) -> HandlerResult {
    let Ok(id) = raw.parse::<EventId>() else {
        return Ok(not_found_response());
    };
    match state.store().get(id)? {
        Some(event) => Ok(Html(render_form(
            "Edit Event",
            &edit_path(id),
            &submission_from_record(&event),
            None,
        ))
        .into_response()),
        None => Ok(not_found_response()),
    }
}

/// POST `/Event/Edit/{id}`.
///
/// The posted `Id` must equal the route id; the row must exist.
async fn edit_submit(
    State(state): State<StubState>,
    Path(raw): Path<String>,
    form: Result<Form<FormSubmission>, FormRejection>,
) -> HandlerResult {
    let Ok(id) = raw.parse::<EventId>() else {
        return Ok(not_found_response());
    };
    let submission = bind_submission(form);
    if submission.posted_id() != Some(id) || state.store().get(id)?.is_none() {
        return Ok(not_found_response());
    }
    match validate_submission(&submission) {
        Ok(event) => {
            if state.store().update(&event.with_id(id))? {
                Ok(redirect_to_listing())
            } else {
                Ok(not_found_response())
            }
        }
        Err(errors) => {
            Ok(Html(render_form("Edit Event", &edit_path(id), &submission, Some(&errors)))
                .into_response())
        }
    }
}

/// POST `/Event/Delete/{id}`.
async fn delete_event(State(state): State<StubState>, Path(raw): Path<String>) -> HandlerResult {
    let id = raw
        .parse::<EventId>()
        .map_err(|err| HandlerFailure(format!("delete id '{raw}': {err}")))?;
    if state.store().delete(id)? {
        Ok(redirect_to_listing())
    } else {
        Err(HandlerFailure(format!("event {id} not found for delete")))
    }
}

/// POST `/Event/Delete/` without an id.
async fn delete_without_id() -> Response {
    server_error("delete requires an event id".to_string())
}

/// Fallback for unknown paths and methods.
async fn not_found() -> Response {
    not_found_response()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Treats unparseable bodies as an empty submission.
fn bind_submission(form: Result<Form<FormSubmission>, FormRejection>) -> FormSubmission {
    form.map(|Form(submission)| submission).unwrap_or_default()
}

/// `404` page.
fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found())).into_response()
}

/// `302 Found` to the listing.
fn redirect_to_listing() -> Response {
    (StatusCode::FOUND, [(LOCATION, LISTING_PATH)]).into_response()
}

/// Edit form action for `id`.
fn edit_path(id: EventId) -> String {
    format!("/Event/Edit/{id}")
}

/// `500` page with failure detail for the audit layer.
fn server_error(detail: String) -> Response {
    let mut response =
        (StatusCode::INTERNAL_SERVER_ERROR, Html(render_server_error())).into_response();
    response.extensions_mut().insert(FailureDetail(detail));
    response
}
