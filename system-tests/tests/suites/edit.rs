// system-tests/tests/suites/edit.rs
// ============================================================================
// Module: Edit Tests
// Description: Edit page and edit submissions.
// Purpose: Ensure full edits persist, identity mismatches are rejected, and
//          partial forms leave the row untouched. Writes act on rows the
//          test adds itself.
// Dependencies: system-tests helpers
// ============================================================================

//! Edit system tests.

use eventmi_core::EventForm;
use eventmi_core::EventOracle;
use helpers::artifacts::TestReporter;
use helpers::harness::EventTarget;
use helpers::harness::expect_status;
use helpers::scenarios::FIRST_EVENT_ID;
use helpers::scenarios::FOREIGN_BODY_ID;
use helpers::scenarios::THIRD_EVENT_ID;
use helpers::scenarios::UPDATED_SUFFIX;
use helpers::scenarios::conference_form;
use helpers::scenarios::event_id;
use helpers::scenarios::unique_name;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn edit_page_of_existing_event_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("edit_page_of_existing_event_returns_ok")?;
    let target = EventTarget::start(&reporter).await?;

    let exchange = target.client().edit_page(event_id(FIRST_EVENT_ID)?).await?;
    expect_status(&exchange, 200)?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec!["GET /Event/Edit/1 returned 200".to_string()], artifacts)?;
    Ok(())
}

/// Renames a freshly added row through a full edit and checks the result.
async fn rename_fresh_row(target: &EventTarget) -> Result<String, Box<dyn std::error::Error>> {
    let record = target.add_scenario_event("Full Edit").await?;
    let renamed = format!("{}{UPDATED_SUFFIX}", record.name);

    let form = EventForm::from_record(&record).with_name(renamed.clone());
    let exchange = target.client().edit_event(record.id, &form).await?;
    expect_status(&exchange, 200)?;
    let updated = target
        .oracle()
        .find_by_id(record.id)?
        .ok_or_else(|| format!("event {} vanished after edit", record.id))?;
    if updated.name != renamed {
        return Err(format!("expected name '{renamed}', found '{}'", updated.name).into());
    }
    if updated.place != record.place || updated.start != record.start {
        return Err("full edit changed columns it re-posted unchanged".into());
    }
    Ok(format!("POST /Event/Edit/{} renamed row to '{renamed}'", record.id))
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_with_full_form_updates_row() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("edit_with_full_form_updates_row")?;
    let target = EventTarget::start(&reporter).await?;

    let note = rename_fresh_row(&target).await?;

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", vec![note], artifacts)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_full_edits_leave_seeded_rows_untouched()
-> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("repeated_full_edits_leave_seeded_rows_untouched")?;
    let target = EventTarget::start(&reporter).await?;
    let seeded_id = event_id(FIRST_EVENT_ID)?;
    let seeded = target.oracle().find_by_id(seeded_id)?;

    let mut notes = Vec::new();
    for _ in 0..3 {
        notes.push(rename_fresh_row(&target).await?);
    }
    if target.oracle().find_by_id(seeded_id)? != seeded {
        return Err("full edit scenario modified seeded event 1".into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish("pass", notes, artifacts)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_with_mismatched_body_id_returns_not_found() -> Result<(), Box<dyn std::error::Error>>
{
    let mut reporter = TestReporter::new("edit_with_mismatched_body_id_returns_not_found")?;
    let target = EventTarget::start(&reporter).await?;
    let name = unique_name("Mismatched Edit");
    let form = conference_form(&name).with_id(event_id(FOREIGN_BODY_ID)?);

    let exchange = target.client().edit_event(event_id(THIRD_EVENT_ID)?, &form).await?;
    expect_status(&exchange, 404)?;
    if target.oracle().event_exists(&name)? {
        return Err(format!("mismatched edit persisted '{name}'").into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec!["POST /Event/Edit/3 with body Id 445 returned 404".to_string()],
        artifacts,
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_with_partial_form_is_redisplayed() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("edit_with_partial_form_is_redisplayed")?;
    let target = EventTarget::start(&reporter).await?;
    let before = target.add_scenario_event("Partial Edit").await?;

    let form = EventForm::default().with_id(before.id);
    let exchange = target.client().edit_event(before.id, &form).await?;
    expect_status(&exchange, 200)?;
    let after = target
        .oracle()
        .find_by_id(before.id)?
        .ok_or_else(|| format!("event {} vanished after edit", before.id))?;
    if after != before {
        return Err("partial edit modified the row".into());
    }

    let artifacts = target.write_artifacts(&reporter)?;
    reporter.finish(
        "pass",
        vec![format!("partial edit of event {} redisplayed without update", before.id)],
        artifacts,
    )?;
    Ok(())
}
