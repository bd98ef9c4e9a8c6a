use crate::errors::Result;
use crate::hooks::RefreshReason;
use crate::model::{Example, Payload};
use crate::reducer::Batch;
use crate::ops::WorkingSet;
use crate::rules::{invariants, payload_matches};

/// Let a new example claim its group's canonical slot
///
/// `others` is scanned for a non-deleted canonical holder of the same group
/// (`example` itself is skipped by id). With no holder and a payload match
/// the example becomes canonical with `canonical_edited`. With a holder it
/// loses any canonical flag it carried.
///
/// Returns true when the example newly became canonical.
pub fn canonicalize_new<'a, I>(example: &mut Example, others: I, payload: &Payload) -> bool
where
    I: IntoIterator<Item = &'a Example>,
{
    let holder_exists = invariants::other_canonical_holder(others, example).is_some();
    if holder_exists {
        example.metadata.canonical = false;
        return false;
    }
    if !payload_matches(example, payload) {
        return false;
    }
    let newly = !example.metadata.canonical;
    example.metadata.canonical = true;
    example.provenance.canonical_edited = true;
    newly
}

/// Plan a canonical toggle on `example_id`
///
/// The target's flag is flipped and marked `canonical_edited`; any other
/// non-deleted holder of the same group is cleared in the same batch.
/// Returns the batch and whether an old holder was cleared.
///
/// # Errors
///
/// * `ExampleNotFound` - no such example
/// * `ExampleDeleted` - target is flagged deleted
pub fn plan_switch_canonical(set: &WorkingSet, example_id: &str) -> Result<(Batch, bool)> {
    let target = set.get_live(example_id)?;
    let mut batch = Batch::new();

    let mut switched = target.clone();
    switched.metadata.canonical = !target.metadata.canonical;
    switched.provenance.canonical_edited = true;

    let old_holder = invariants::other_canonical_holder(set, target).cloned();
    let cleared = match old_holder {
        Some(mut old) => {
            old.metadata.canonical = false;
            batch.replace(old);
            true
        }
        None => false,
    };

    batch
        .replace(switched)
        .force_refresh(RefreshReason::CanonicalChanged);
    Ok((batch, cleared))
}
