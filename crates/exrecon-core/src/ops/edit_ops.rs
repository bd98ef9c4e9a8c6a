use crate::errors::{ReconError, Result};
use crate::hooks::RefreshReason;
use crate::model::{Example, Payload};
use crate::ops::canonical_ops::canonicalize_new;
use crate::ops::WorkingSet;
use crate::reducer::Batch;
use crate::rules::invariants;

/// Plan content edits of existing examples
///
/// Each incoming record is matched by id. `text`, `intent` and `entities`
/// replace the current values; metadata is shallow-merged. Incoming
/// provenance is ignored. A record whose merged content equals the current
/// one is dropped without dirtying anything.
///
/// A new example re-runs canonicalization against the rest of the set.
/// Any other example is flagged `edited`, and loses a canonical flag that
/// would collide with another holder of its (possibly changed) group.
///
/// Returns the batch and the number of examples that actually changed.
///
/// # Errors
///
/// * `ExampleNotFound` - an id is not in the set
/// * `ExampleDeleted` - an id is flagged deleted
pub fn plan_edit(
    set: &WorkingSet,
    examples: Vec<Example>,
    payload: &Payload,
) -> Result<(Batch, usize)> {
    let mut batch = Batch::new();
    // Later records in the batch see earlier ones
    let mut staged: Vec<Example> = set.examples().to_vec();
    let mut changed: Vec<String> = Vec::new();

    for incoming in examples {
        let idx = staged
            .iter()
            .position(|ex| ex.id == incoming.id)
            .ok_or_else(|| ReconError::ExampleNotFound {
                example_id: incoming.id.clone(),
            })?;
        let current = &staged[idx];
        if current.is_deleted() {
            return Err(ReconError::ExampleDeleted {
                example_id: incoming.id,
            });
        }

        let mut next = current.clone();
        next.text = incoming.text;
        next.intent = incoming.intent;
        next.entities = incoming.entities;
        next.metadata = current.metadata.merged_with(&incoming.metadata);

        if next.same_content(current) {
            continue;
        }

        if next.provenance.is_new {
            if canonicalize_new(&mut next, staged.iter(), payload) {
                batch.force_refresh(RefreshReason::CanonicalChanged);
            }
        } else {
            next.provenance.edited = true;
            if next.is_canonical()
                && invariants::other_canonical_holder(staged.iter(), &next).is_some()
            {
                next.metadata.canonical = false;
            }
        }

        if next.metadata.canonical != current.metadata.canonical {
            next.provenance.canonical_edited = true;
            batch.force_refresh(RefreshReason::CanonicalChanged);
        }

        if !changed.contains(&next.id) {
            changed.push(next.id.clone());
        }
        staged[idx] = next;
    }

    for id in &changed {
        if let Some(ex) = staged.iter().find(|ex| &ex.id == id) {
            batch.replace(ex.clone());
        }
    }
    Ok((batch, changed.len()))
}
