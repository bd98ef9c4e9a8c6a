/// Scenario 4: Edit
///
/// Content edits set `edited`, no-op edits are dropped, new examples
/// re-run canonicalization.
mod common;

use common::{canonical_flight, canonical_ids, flight, flight_payload, merged, run};
use exrecon_core::{
    apply, Command, CommandOutcome, EntityAnnotation, ReconError, ReduceContext, RefreshReason,
};
use serde_json::json;

#[test]
fn test_scenario_04_edit_sets_edited_flag() {
    let payload = flight_payload();
    let state = merged(&payload, vec![flight("1"), flight("2")]);

    let mut edit = state.get("2").unwrap().clone();
    edit.text = "book me a flight to Oslo".into();

    let applied = run(&payload, state, Command::Edit { examples: vec![edit] });

    assert_eq!(applied.outcome, CommandOutcome::Edited { changed: 1 });
    let ex = applied.state.get("2").unwrap();
    assert!(ex.provenance.edited);
    assert_eq!(ex.text, "book me a flight to Oslo");
    // edited examples sort above unchanged ones
    assert_eq!(applied.state.examples()[0].id, "2");
}

#[test]
fn test_scenario_04_identical_edit_is_dropped() {
    let payload = flight_payload();
    let state = merged(&payload, vec![flight("1")]);
    let before = state.clone();
    let same = state.get("1").unwrap().clone();

    let applied = run(&payload, state, Command::Edit { examples: vec![same] });

    assert_eq!(applied.outcome, CommandOutcome::Edited { changed: 0 });
    assert_eq!(applied.state, before);
    assert!(!applied.state.has_unsaved_changes());
    assert!(applied.refresh.is_empty());
}

#[test]
fn test_scenario_04_incoming_provenance_is_ignored() {
    let payload = flight_payload();
    let state = merged(&payload, vec![flight("1")]);
    let mut same = state.get("1").unwrap().clone();
    same.provenance.deleted = true;
    same.provenance.is_new = true;

    let applied = run(&payload, state, Command::Edit { examples: vec![same] });
    let ex = applied.state.get("1").unwrap();
    assert!(!ex.provenance.deleted);
    assert!(!ex.provenance.is_new);
}

#[test]
fn test_scenario_04_metadata_is_shallow_merged() {
    let payload = flight_payload();
    let mut stored = flight("1");
    stored.metadata.set("language", json!("en"));
    let state = merged(&payload, vec![stored]);

    let mut edit = state.get("1").unwrap().clone();
    edit.metadata.extra.clear();
    edit.metadata.set("reviewed", json!(true));
    edit.text = "changed".into();

    let applied = run(&payload, state, Command::Edit { examples: vec![edit] });
    let ex = applied.state.get("1").unwrap();
    assert_eq!(ex.metadata.get("language"), Some(&json!("en")));
    assert_eq!(ex.metadata.get("reviewed"), Some(&json!(true)));
}

#[test]
fn test_scenario_04_entities_replaced_wholesale() {
    let payload = flight_payload();
    let state = merged(&payload, vec![flight("1")]);

    let mut edit = state.get("1").unwrap().clone();
    edit.entities = vec![EntityAnnotation::new("date", "monday")];

    let applied = run(&payload, state, Command::Edit { examples: vec![edit] });
    let ex = applied.state.get("1").unwrap();
    assert_eq!(ex.entities, vec![EntityAnnotation::new("date", "monday")]);
    // no longer matches the payload: flagged and sorted first
    assert!(ex.provenance.invalid);
    assert_eq!(applied.state.examples()[0].id, "1");
}

#[test]
fn test_scenario_04_new_example_claims_slot_after_edit() {
    // GIVEN a new example inserted while it did not match the payload
    let payload = flight_payload();
    let candidate = exrecon_core::Candidate::new("fly", "book_flight");
    let inserted = run(
        &payload,
        merged(&payload, vec![]),
        Command::Insert {
            candidates: vec![candidate],
        },
    );
    let id = inserted.state.examples()[0].id.clone();
    assert!(!inserted.state.get(&id).unwrap().metadata.canonical);

    // WHEN it is edited into the payload's group
    let mut edit = inserted.state.get(&id).unwrap().clone();
    edit.entities = vec![EntityAnnotation::new("city", "Rome")];
    let applied = run(&payload, inserted.state, Command::Edit { examples: vec![edit] });

    // THEN it claims the empty canonical slot and stays new (not edited)
    let ex = applied.state.get(&id).unwrap();
    assert!(ex.metadata.canonical);
    assert!(ex.provenance.canonical_edited);
    assert!(ex.provenance.is_new);
    assert!(!ex.provenance.edited);
    assert!(applied.refresh.contains(&RefreshReason::CanonicalChanged));
}

#[test]
fn test_scenario_04_edit_into_occupied_group_drops_canonical() {
    // GIVEN a canonical hotel example and a canonical flight example
    let payload = flight_payload();
    let hotel = exrecon_core::Example::new("h", "fly to Rome", "book_hotel")
        .with_entity(EntityAnnotation::new("city", "Rome"))
        .with_metadata(exrecon_core::ExampleMetadata::canonical());
    let state = exrecon_core::WorkingSet::from_examples(vec![canonical_flight("1"), hotel]);

    // WHEN the hotel example is re-labelled as a flight
    let mut edit = state.get("h").unwrap().clone();
    edit.intent = "book_flight".into();
    let applied = run(&payload, state, Command::Edit { examples: vec![edit] });

    // THEN the group keeps a single canonical example
    assert_eq!(canonical_ids(&applied.state), vec!["1".to_string()]);
    let ex = applied.state.get("h").unwrap();
    assert!(ex.provenance.edited);
    assert!(ex.provenance.canonical_edited);
}

#[test]
fn test_scenario_04_displayed_edit_forces_refresh() {
    let payload = flight_payload();
    let ctx = ReduceContext::new(&payload).with_displayed(Some("1"));
    let state = merged(&payload, vec![flight("1")]);
    let mut edit = state.get("1").unwrap().clone();
    edit.text = "changed".into();

    let applied = apply(state, Command::Edit { examples: vec![edit] }, &ctx).unwrap();
    assert_eq!(applied.refresh, vec![RefreshReason::DisplayedEdited]);
}

#[test]
fn test_scenario_04_edit_of_deleted_example_fails() {
    let payload = flight_payload();
    let ctx = ReduceContext::new(&payload);
    let state = run(
        &payload,
        merged(&payload, vec![flight("1")]),
        Command::ToggleDelete {
            example_ids: vec!["1".to_string()],
        },
    )
    .state;
    let mut edit = state.get("1").unwrap().clone();
    edit.text = "changed".into();

    let result = apply(state, Command::Edit { examples: vec![edit] }, &ctx);
    assert!(matches!(result, Err(ReconError::ExampleDeleted { .. })));
}

#[test]
fn test_scenario_04_unknown_edit_fails() {
    let payload = flight_payload();
    let ctx = ReduceContext::new(&payload);
    let result = apply(
        merged(&payload, vec![]),
        Command::Edit {
            examples: vec![flight("ghost")],
        },
        &ctx,
    );
    assert!(matches!(result, Err(ReconError::ExampleNotFound { .. })));
}
