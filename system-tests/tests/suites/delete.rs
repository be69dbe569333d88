// system-tests/tests/suites/delete.rs
// ============================================================================
// Module: Delete Tests
// Description: Event removal through the delete route.
// Purpose: Ensure a created row can be deleted and a missing id fails.
// Dependencies: system-tests helpers
// ============================================================================

//! Delete system tests.

use eventmi_core::EventOracle;
use helpers::artifacts::TestReporter;
use helpers::harness::EventTarget;
use helpers::harness::expect_status;
use helpers::scenarios::event_for_deleting;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn delete_created_event_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("delete_created_event_returns_ok")?;
    let target = EventTarget::start(&reporter).await?;
    let form = event_for_deleting();
    let name = form.name.clone().ok_or("fixture form has no name")?;

    let added = target.client().add_event(&form).await?;
    expect_status(&added, 200)?;
    let record = target
        .oracle()
        .find_by_name(&name)?
        .ok_or_else(|| format!("event '{name}' missing from datastore after add"))?;

    let exchange = target.client().delete_event(Some(record.id)).await?;
    expect_status(&exchange, 200)?;
    if target.oracle().find_by_id(record.id)?.is_some() {
        return Err(format!("event {} still present after delete", record.id).into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec![format!("POST /Event/Delete/{} removed '{name}'", record.id)],
        artifacts,
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_without_id_returns_server_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("delete_without_id_returns_server_error")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().delete_event(None).await?;
    expect_status(&exchange, 500)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["POST /Event/Delete/ returned 500".to_string()], artifacts)?;
    Ok(())
}
