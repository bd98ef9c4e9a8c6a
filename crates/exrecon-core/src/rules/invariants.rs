use std::collections::BTreeMap;

use crate::model::Example;
use crate::rules::matching::CanonicalGroupKey;

/// Groups with more than one non-deleted canonical holder
///
/// Returns (group key, holder ids in working-set order). Insert, edit and
/// switch-canonical never produce this; undeleting a former holder or
/// merging store data can. Reported only, never an error.
pub fn find_canonical_conflicts<'a, I>(examples: I) -> Vec<(CanonicalGroupKey, Vec<String>)>
where
    I: IntoIterator<Item = &'a Example>,
{
    let mut holders: BTreeMap<CanonicalGroupKey, Vec<String>> = BTreeMap::new();
    for ex in examples {
        if ex.is_canonical() && !ex.is_deleted() {
            holders
                .entry(CanonicalGroupKey::of(ex))
                .or_default()
                .push(ex.id.clone());
        }
    }
    holders.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
}

/// Ids of non-deleted examples flagged invalid
pub fn find_live_invalid<'a, I>(examples: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Example>,
{
    examples
        .into_iter()
        .filter(|ex| ex.provenance.invalid && !ex.is_deleted())
        .map(|ex| ex.id.clone())
        .collect()
}

/// The non-deleted canonical holder of `example`'s group, other than
/// `example` itself
pub fn other_canonical_holder<'a, I>(examples: I, example: &Example) -> Option<&'a Example>
where
    I: IntoIterator<Item = &'a Example>,
{
    let key = CanonicalGroupKey::of(example);
    examples.into_iter().find(|other| {
        other.id != example.id
            && other.is_canonical()
            && !other.is_deleted()
            && CanonicalGroupKey::of(other) == key
    })
}
