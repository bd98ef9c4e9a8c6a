use crate::errors::{ReconError, Result};
use crate::hooks::RefreshReason;
use crate::model::{Candidate, Example, Payload};
use crate::ops::canonical_ops::canonicalize_new;
use crate::ops::WorkingSet;
use crate::reducer::Batch;

/// Plan the insertion of new candidates at the top of the set
///
/// Every candidate is flagged `is_new` and inserted non-canonical unless it
/// can claim an empty canonical slot. Candidates accepted earlier in the
/// same batch count as slot holders for later ones.
///
/// Returns the batch and the ids assigned to the candidates, in input order.
///
/// # Errors
///
/// Returns `DuplicateExample` if a candidate carries an id already present
/// in the set or earlier in the batch.
pub fn plan_insert(
    set: &WorkingSet,
    candidates: Vec<Candidate>,
    payload: &Payload,
) -> Result<(Batch, Vec<String>)> {
    let mut batch = Batch::new();
    let mut accepted: Vec<Example> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let mut example = candidate.into_new_example();
        if set.contains(&example.id) || accepted.iter().any(|a| a.id == example.id) {
            return Err(ReconError::DuplicateExample {
                example_id: example.id,
            });
        }

        example.metadata.canonical = false;
        let live = set.live().chain(accepted.iter());
        if canonicalize_new(&mut example, live, payload) {
            batch.force_refresh(RefreshReason::CanonicalChanged);
        }
        accepted.push(example);
    }

    let ids = accepted.iter().map(|ex| ex.id.clone()).collect();
    for example in accepted {
        batch.insert_front(example);
    }
    Ok((batch, ids))
}
