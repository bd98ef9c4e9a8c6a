/// Scenario 3: Delete / undelete
///
/// Deletion is a reversible flag; nothing leaves the working set.
mod common;

use common::{canonical_flight, flight, flight_candidate, flight_payload, merged, run};
use exrecon_core::{apply, Command, CommandOutcome, ReconError, ReduceContext, RefreshReason};

#[test]
fn test_scenario_03_toggle_twice_restores_record() {
    // GIVEN a new canonical example (carries is_new and canonical_edited)
    let payload = flight_payload();
    let state = run(
        &payload,
        merged(&payload, vec![flight("1")]),
        Command::Insert {
            candidates: vec![flight_candidate("fly to Rome")],
        },
    )
    .state;
    let snapshot = state.clone();
    let ids: Vec<String> = state.iter().map(|ex| ex.id.clone()).collect();

    // WHEN toggling deletion of every example twice
    let once = run(
        &payload,
        state,
        Command::ToggleDelete {
            example_ids: ids.clone(),
        },
    );
    assert!(once.state.iter().all(|ex| ex.provenance.deleted));
    assert_eq!(once.state.len(), snapshot.len());

    let twice = run(
        &payload,
        once.state,
        Command::ToggleDelete { example_ids: ids },
    );

    // THEN the set is exactly what it was
    assert_eq!(twice.state, snapshot);
}

#[test]
fn test_scenario_03_delete_keeps_other_flags() {
    let payload = flight_payload();
    let state = merged(&payload, vec![canonical_flight("1")]);
    let state = run(
        &payload,
        state,
        Command::SwitchCanonical {
            example_id: "1".to_string(),
        },
    )
    .state;

    let applied = run(
        &payload,
        state,
        Command::ToggleDelete {
            example_ids: vec!["1".to_string()],
        },
    );
    let ex = applied.state.get("1").unwrap();
    assert!(ex.provenance.deleted);
    assert!(ex.provenance.canonical_edited);
}

#[test]
fn test_scenario_03_repeated_id_toggles_once() {
    let payload = flight_payload();
    let applied = run(
        &payload,
        merged(&payload, vec![flight("1")]),
        Command::ToggleDelete {
            example_ids: vec!["1".to_string(), "1".to_string()],
        },
    );
    assert!(applied.state.get("1").unwrap().provenance.deleted);
    assert_eq!(
        applied.outcome,
        CommandOutcome::DeleteToggled {
            example_ids: vec!["1".to_string()]
        }
    );
}

#[test]
fn test_scenario_03_displayed_deletion_forces_refresh_both_ways() {
    let payload = flight_payload();
    let ctx = ReduceContext::new(&payload).with_displayed(Some("1"));
    let state = merged(&payload, vec![flight("1")]);
    let cmd = Command::ToggleDelete {
        example_ids: vec!["1".to_string()],
    };

    let deleted = apply(state, cmd.clone(), &ctx).unwrap();
    assert_eq!(deleted.refresh, vec![RefreshReason::DisplayedDeletionToggled]);

    let restored = apply(deleted.state, cmd, &ctx).unwrap();
    assert_eq!(restored.refresh, vec![RefreshReason::DisplayedDeletionToggled]);
}

#[test]
fn test_scenario_03_unknown_id_rejects_whole_batch() {
    let payload = flight_payload();
    let ctx = ReduceContext::new(&payload);
    let state = merged(&payload, vec![flight("1")]);

    let result = apply(
        state,
        Command::ToggleDelete {
            example_ids: vec!["1".to_string(), "ghost".to_string()],
        },
        &ctx,
    );
    assert!(matches!(
        result,
        Err(ReconError::ExampleNotFound { example_id }) if example_id == "ghost"
    ));
}
