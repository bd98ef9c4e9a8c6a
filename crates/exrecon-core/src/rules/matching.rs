//! Payload matching and canonical grouping
//!
//! Matching is relative to the session payload; grouping is intrinsic to
//! the examples. An example can sit in a group while being invalid for the
//! payload being edited.

use crate::model::{Example, Payload};

/// True iff the intent is equal and the entity-type sets are equal
///
/// Values and spans play no part. This is the only definition of "valid
/// for this payload".
pub fn payload_matches(example: &Example, payload: &Payload) -> bool {
    if example.intent != payload.intent {
        return false;
    }
    let types = example.entity_types();
    types.len() == payload.entity_types.len()
        && payload
            .entity_types
            .iter()
            .all(|t| types.contains(t.as_str()))
}

/// True iff both examples have the same intent and entity-type set
pub fn same_canonical_group(a: &Example, b: &Example) -> bool {
    a.intent == b.intent && a.entity_types() == b.entity_types()
}

/// Equivalence key of a canonical group: intent plus sorted distinct types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalGroupKey {
    pub intent: String,
    pub entity_types: Vec<String>,
}

impl CanonicalGroupKey {
    pub fn of(example: &Example) -> Self {
        Self {
            intent: example.intent.clone(),
            entity_types: example
                .entity_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Key of the group the payload itself designates
    pub fn of_payload(payload: &Payload) -> Self {
        Self {
            intent: payload.intent.clone(),
            entity_types: payload.entity_types.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for CanonicalGroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.intent, self.entity_types.join(","))
    }
}
