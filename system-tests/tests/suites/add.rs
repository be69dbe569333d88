// system-tests/tests/suites/add.rs
// ============================================================================
// Module: Add Tests
// Description: Event creation through the add form.
// Purpose: Ensure valid submissions persist and invalid ones do not.
// Dependencies: system-tests helpers
// ============================================================================

//! Add-form system tests.

use eventmi_core::EventForm;
use eventmi_core::EventOracle;
use helpers::artifacts::TestReporter;
use helpers::harness::EventTarget;
use helpers::harness::expect_status;
use helpers::scenarios::conference_form;
use helpers::scenarios::unique_name;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn add_valid_event_persists_row() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("add_valid_event_persists_row")?;
    let target = EventTarget::start(&reporter).await?;
    let name = unique_name("CSKA Conf");

    let exchange = target.client().add_event(&conference_form(&name)).await?;
    expect_status(&exchange, 200)?;
    if !target.oracle().event_exists(&name)? {
        return Err(format!("event '{name}' missing from datastore after add").into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec![format!("POST /Event/Add created '{name}'")],
        artifacts,
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn add_incomplete_event_is_redisplayed() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("add_incomplete_event_is_redisplayed")?;
    let target = EventTarget::start(&reporter).await?;
    let name = unique_name("Nameless Venue");
    let form = EventForm::default().with_name(name.clone());

    let exchange = target.client().add_event(&form).await?;
    expect_status(&exchange, 200)?;
    if exchange.was_redirected() {
        return Err("incomplete add form was accepted".into());
    }
    if target.oracle().event_exists(&name)? {
        return Err(format!("incomplete event '{name}' was persisted").into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec!["incomplete add form redisplayed without insert".to_string()],
        artifacts,
    )?;
    Ok(())
}
