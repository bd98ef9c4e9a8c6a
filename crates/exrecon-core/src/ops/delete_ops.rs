use crate::errors::Result;
use crate::ops::WorkingSet;
use crate::reducer::Batch;

/// Plan a deletion toggle for each id
///
/// Only `deleted` flips; every other provenance flag is left as is, so a
/// second toggle restores the record exactly. Repeated ids are toggled once.
///
/// Returns the batch and the distinct ids toggled, in input order.
///
/// # Errors
///
/// Returns `ExampleNotFound` if any id is not in the set; nothing is toggled.
pub fn plan_toggle_delete(set: &WorkingSet, ids: &[String]) -> Result<(Batch, Vec<String>)> {
    let mut batch = Batch::new();
    let mut toggled: Vec<String> = Vec::with_capacity(ids.len());

    for id in ids {
        if toggled.contains(id) {
            continue;
        }
        let mut example = set.get(id)?.clone();
        example.provenance.deleted = !example.provenance.deleted;
        batch.replace(example);
        toggled.push(id.clone());
    }
    Ok((batch, toggled))
}
