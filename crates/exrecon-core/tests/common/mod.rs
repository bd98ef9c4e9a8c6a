use exrecon_core::{
    apply, Applied, Candidate, Command, EntityAnnotation, Example, ExampleMetadata, Payload,
    ReduceContext, WorkingSet,
};

/// Payload used by most scenarios: book_flight with a city
#[allow(dead_code)]
pub fn flight_payload() -> Payload {
    Payload::new("book_flight", ["city"])
}

/// A persisted example matching `flight_payload()`
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

/// Load `examples` through a merge, as a session does at open
#[allow(dead_code)]
pub fn merged(payload: &Payload, examples: Vec<Example>) -> WorkingSet {
    let ctx = ReduceContext::new(payload);
    apply(WorkingSet::new(), Command::Merge { examples }, &ctx)
        .expect("merge never fails on an empty set")
        .state
}

#[allow(dead_code)]
pub fn run(payload: &Payload, state: WorkingSet, cmd: Command) -> Applied {
    let ctx = ReduceContext::new(payload);
    apply(state, cmd, &ctx).expect("command should apply")
}

#[allow(dead_code)]
pub fn canonical_ids(set: &WorkingSet) -> Vec<String> {
    set.live()
        .filter(|ex| ex.metadata.canonical)
        .map(|ex| ex.id.clone())
        .collect()
}
