// system-tests/tests/suites/details.rs
// ============================================================================
// Module: Details Tests
// Description: Single-event details route.
// Purpose: Ensure existing rows render and a missing id is not found.
// Dependencies: system-tests helpers
// ============================================================================

//! Details system tests.

use helpers::artifacts::TestReporter;
use helpers::harness::EventTarget;
use helpers::harness::expect_status;
use helpers::scenarios::FIRST_EVENT_ID;
use helpers::scenarios::event_id;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn details_of_existing_event_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("details_of_existing_event_returns_ok")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().details(Some(event_id(FIRST_EVENT_ID)?)).await?;
    expect_status(&exchange, 200)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["GET /Event/Details/1 returned 200".to_string()], artifacts)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn details_without_id_returns_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("details_without_id_returns_not_found")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().details(None).await?;
    expect_status(&exchange, 404)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["GET /Event/Details/ returned 404".to_string()], artifacts)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_requests_return_same_status() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("repeated_requests_return_same_status")?;
    let target = EventTarget::start(&reporter).await?;
    let id = event_id(FIRST_EVENT_ID)?;

    for route_id in [Some(id), None] {
        let first = target.client().details(route_id).await?;
        let second = target.client().details(route_id).await?;
        if first.status / 100 != second.status / 100 {
            return Err(format!(
                "{}: status changed from {} to {}",
                first.path, first.status, second.status
            )
            .into());
        }
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec!["repeated details requests kept their status class".to_string()],
        artifacts,
    )?;
    Ok(())
}
