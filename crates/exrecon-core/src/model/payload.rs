use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Target criteria a session curates examples against
///
/// Immutable for the lifetime of one editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub intent: String,
    pub entity_types: BTreeSet<String>,
}

impl Payload {
    pub fn new<I, S>(intent: impl Into<String>, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            intent: intent.into(),
            entity_types: entity_types.into_iter().map(Into::into).collect(),
        }
    }
}
