//! Full editing round-trips against the SQLite store

use exrecon_core::hooks::{BackingStore, RecordingRefreshListener, RefreshReason};
use exrecon_core::model::{Candidate, EntityAnnotation, Example, ExampleMetadata, Payload};
use exrecon_engine::{EditingSession, EngineConfig};
use std::sync::Arc;

fn flight(id: &str) -> Example {
    Example::new(id, format!("fly to {id}"), "book_flight")
        .with_entity(EntityAnnotation::new("city", id))
}

fn payload() -> Payload {
    Payload::new("book_flight", ["city"])
}

#[test]
fn test_edit_session_round_trip_through_sqlite() {
    // GIVEN a file-backed store holding a canonical and a plain example
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::from_toml_str(&format!(
        "project_id = \"travel\"\nlanguage = \"en\"\ndatabase_path = {:?}\n",
        dir.path().join("examples.db").display().to_string()
    ))
    .unwrap();
    let mut store = config.open_store().unwrap();
    store
        .commit_examples(
            "travel",
            "en",
            &[
                flight("Rome").with_metadata(ExampleMetadata::canonical()),
                flight("Oslo"),
            ],
        )
        .unwrap();

    // WHEN a session deletes the holder, adds a new example and saves
    let listener = Arc::new(RecordingRefreshListener::new());
    let mut session =
        EditingSession::open(&config, payload()).with_listener(Box::new(listener.clone()));
    assert_eq!(session.load(&store).unwrap(), 2);
    session.toggle_delete(vec!["Rome".to_string()]).unwrap();
    let ids = session
        .insert(vec![Candidate::new("fly to Lima", "book_flight")
            .with_entity(EntityAnnotation::new("city", "Lima"))])
        .unwrap();
    let receipt = session.commit(&mut store).unwrap();

    // THEN the new example took over the freed canonical slot
    assert!(receipt.refresh_pending);
    assert!(listener.reasons().contains(&RefreshReason::CanonicalChanged));

    // AND a fresh session sees the persisted result
    let mut next = EditingSession::open(&config, payload());
    next.load(&store).unwrap();
    let set = next.working_set().unwrap();
    assert_eq!(set.len(), 2);
    assert!(!set.contains("Rome"));
    let lima = set.get(&ids[0]).unwrap();
    assert!(lima.is_canonical());
    assert!(!lima.provenance.is_dirty());
    assert!(!set.get("Oslo").unwrap().is_canonical());
}

#[test]
fn test_switch_canonical_persists_hand_over() {
    let config = EngineConfig::default();
    let mut store = config.open_store().unwrap();
    store
        .commit_examples(
            "default",
            "en",
            &[
                flight("Rome").with_metadata(ExampleMetadata::canonical()),
                flight("Oslo"),
            ],
        )
        .unwrap();

    let mut session = EditingSession::open(&config, payload());
    session.load(&store).unwrap();
    let switch = session.switch_canonical("Oslo").unwrap();
    assert!(switch.cleared_old_canonical);
    session.commit(&mut store).unwrap();

    let fetched = store.fetch_examples("book_flight", "en").unwrap();
    let canonical: Vec<&str> = fetched
        .iter()
        .filter(|ex| ex.is_canonical())
        .map(|ex| ex.id.as_str())
        .collect();
    assert_eq!(canonical, vec!["Oslo"]);
}

#[test]
fn test_other_language_is_invisible() {
    let config = EngineConfig::default();
    let mut store = config.open_store().unwrap();
    store
        .commit_examples("default", "de", &[flight("Berlin")])
        .unwrap();

    let mut session = EditingSession::open(&config, payload());
    assert_eq!(session.load(&store).unwrap(), 0);
}
