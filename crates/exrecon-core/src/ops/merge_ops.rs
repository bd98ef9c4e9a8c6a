use std::collections::HashSet;

use crate::model::{Example, Payload, Provenance};
use crate::ops::WorkingSet;
use crate::reducer::Batch;
use crate::rules::payload_matches;

/// Plan the reconciliation of a store batch into the working set
///
/// Keeps fetched examples whose id is unknown to the set and that match the
/// payload, with provenance reset, appended after the current members.
/// Known ids are skipped: local edits always win over store data. Applying
/// the same batch twice appends nothing the second time.
///
/// Returns the batch and the number of appended examples.
pub fn plan_merge(set: &WorkingSet, fetched: Vec<Example>, payload: &Payload) -> (Batch, usize) {
    let mut batch = Batch::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut appended = 0;

    for mut example in fetched {
        if set.contains(&example.id) || !seen.insert(example.id.clone()) {
            continue;
        }
        if !payload_matches(&example, payload) {
            continue;
        }
        example.provenance = Provenance::default();
        batch.append(example);
        appended += 1;
    }
    (batch, appended)
}
