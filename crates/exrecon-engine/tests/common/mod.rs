use std::cell::Cell;

use exrecon_core::errors::{ExError, ExErrorKind};
use exrecon_core::hooks::BackingStore;
use exrecon_core::model::{Candidate, EntityAnnotation, Example, ExampleMetadata, Payload};
use exrecon_engine::{EditingSession, EngineConfig};

/// In-memory store that can be told to fail and counts its calls
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeStore {
    pub examples: Vec<Example>,
    pub committed: Vec<Vec<Example>>,
    pub fail_fetch: bool,
    pub fail_commit: bool,
    pub fetch_calls: Cell<usize>,
    pub commit_calls: usize,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn with_examples(examples: Vec<Example>) -> Self {
        Self {
            examples,
            ..Self::default()
        }
    }

    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }
}

impl BackingStore for FakeStore {
    fn fetch_examples(&self, intent: &str, _language: &str) -> Result<Vec<Example>, ExError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.fail_fetch {
            return Err(ExError::new(ExErrorKind::Io)
                .with_op("fetch_examples")
                .with_message("store unavailable"));
        }
        Ok(self
            .examples
            .iter()
            .filter(|ex| ex.intent == intent)
            .cloned()
            .collect())
    }

    fn commit_examples(
        &mut self,
        _project_id: &str,
        _language: &str,
        examples: &[Example],
    ) -> Result<(), ExError> {
        self.commit_calls += 1;
        if self.fail_commit {
            return Err(ExError::new(ExErrorKind::Persistence)
                .with_op("commit_examples")
                .with_message("disk full"));
        }
        self.committed.push(examples.to_vec());
        Ok(())
    }
}

#[allow(dead_code)]
pub fn flight_payload() -> Payload {
    Payload::new("book_flight", ["city"])
}

#[allow(dead_code)]
pub fn flight(id: &str) -> Example {
    Example::new(id, format!("fly to {id}"), "book_flight")
        .with_entity(EntityAnnotation::new("city", id))
}

#[allow(dead_code)]
pub fn canonical_flight(id: &str) -> Example {
    flight(id).with_metadata(ExampleMetadata::canonical())
}

#[allow(dead_code)]
pub fn flight_candidate(text: &str) -> Candidate {
    Candidate::new(text, "book_flight").with_entity(EntityAnnotation::new("city", "Rome"))
}

/// A session on `flight_payload()` loaded from `store`
#[allow(dead_code)]
pub fn loaded_session(store: &FakeStore) -> EditingSession {
    let mut session = EditingSession::open(&EngineConfig::default(), flight_payload());
    session.load(store).expect("fake store load");
    session
}
