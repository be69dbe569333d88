// system-tests/tests/suites/listing.rs
// ============================================================================
// Module: Listing Tests
// Description: Read-only page routes of the Event application.
// Purpose: Ensure the listing and the empty add form render.
// Dependencies: system-tests helpers
// ============================================================================

//! Listing and add-page system tests.

use helpers::artifacts::TestReporter;
use helpers::harness::EventTarget;
use helpers::harness::expect_status;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn get_all_events_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("get_all_events_returns_ok")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().list_events().await?;
    expect_status(&exchange, 200)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["GET /Event/All returned 200".to_string()], artifacts)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn add_page_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("add_page_returns_ok")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().add_page().await?;
    expect_status(&exchange, 200)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["GET /Event/Add returned 200".to_string()], artifacts)?;
    Ok(())
}
