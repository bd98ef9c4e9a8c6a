#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{flight, flight_candidate, loaded_session, FakeStore};
use exrecon_core::logging_facility::test_capture::init_test_capture;
use exrecon_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_FORCE_REFRESH, EVENT_START, FIELD_ERR_CODE,
};

// One test per binary: the capture is process-global
#[test]
fn test_session_operations_emit_boundary_events() {
    let capture = init_test_capture();

    let mut store = FakeStore::with_examples(vec![flight("1")]);
    let mut session = loaded_session(&store);
    session.insert(vec![flight_candidate("fly to Rome")]).unwrap();
    session
        .insert(vec![exrecon_core::Candidate::new("hi", "book_flight")])
        .unwrap();
    let _ = session.commit(&mut store);
    let _ = session.toggle_delete(vec!["ghost".to_string()]);

    // load and insert are bracketed by start/end
    capture.assert_event_exists("load", EVENT_START);
    capture.assert_event_exists("load", EVENT_END);
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some("insert")
            && e.event.as_deref() == Some(EVENT_START)),
        2
    );
    let start = &capture.events_for_op("insert")[0];
    assert_eq!(start.field("session_id"), Some(session.id().as_str()));
    assert_eq!(start.field("batch_len"), Some("1"));

    // refused commit logs the gate's code
    let commit_errors: Vec<_> = capture
        .events_for_op("commit")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(commit_errors.len(), 1);
    assert_eq!(commit_errors[0].field(FIELD_ERR_CODE), Some("ERR_COMMIT_REFUSED"));

    capture.assert_event_exists("toggle_delete", EVENT_END_ERROR);

    // the canonical claim by the first insert raised a force refresh
    assert!(
        capture.count_events(|e| e.event.as_deref() == Some(EVENT_FORCE_REFRESH)
            && e.field("session_id") == Some(session.id().as_str()))
            >= 1
    );
}
