use std::collections::BTreeSet;

use crate::errors::{ReconError, Result};
use crate::model::Example;
use crate::rules::{invariants, CanonicalGroupKey};

/// Ordered, session-scoped collection of examples under edit
///
/// Order is display order and is re-derived by the reducer after every
/// mutation; it is not insertion order. Single-threaded by construction:
/// the owning session is the only writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    pub(crate) examples: Vec<Example>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-ordered examples, bypassing the reducer
    ///
    /// Intended for test setup and replay; flags are taken as given.
    pub fn from_examples(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    /// Get an example by id, deleted or not
    ///
    /// # Errors
    ///
    /// Returns `ExampleNotFound` if no example has this id.
    pub fn get(&self, id: &str) -> Result<&Example> {
        self.examples
            .iter()
            .find(|ex| ex.id == id)
            .ok_or_else(|| ReconError::ExampleNotFound {
                example_id: id.to_string(),
            })
    }

    /// Get an example that is not flagged deleted
    ///
    /// # Errors
    ///
    /// Returns `ExampleNotFound` if missing, `ExampleDeleted` if flagged deleted.
    pub fn get_live(&self, id: &str) -> Result<&Example> {
        let ex = self.get(id)?;
        if ex.is_deleted() {
            return Err(ReconError::ExampleDeleted {
                example_id: id.to_string(),
            });
        }
        Ok(ex)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.examples.iter().any(|ex| ex.id == id)
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    /// Examples not flagged deleted, in display order
    pub fn live(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter().filter(|ex| !ex.is_deleted())
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Whether cancelling would lose anything
    pub fn has_unsaved_changes(&self) -> bool {
        self.examples.iter().any(|ex| ex.provenance.is_dirty())
    }

    /// Whether a commit would be refused for invalid examples
    pub fn has_invalid_examples(&self) -> bool {
        !invariants::find_live_invalid(self.iter()).is_empty()
    }

    /// Groups holding more than one live canonical example
    ///
    /// Informational: such a set still commits.
    pub fn canonical_conflicts(&self) -> Vec<(CanonicalGroupKey, Vec<String>)> {
        invariants::find_canonical_conflicts(self.iter())
    }

    /// Distinct intents across the set, sorted. Deleted examples count.
    pub fn intents(&self) -> Vec<&str> {
        self.examples
            .iter()
            .map(|ex| ex.intent.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct entity types across the set, sorted. Deleted examples count.
    pub fn entity_types(&self) -> Vec<&str> {
        self.examples
            .iter()
            .flat_map(|ex| ex.entities.iter().map(|e| e.entity.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn into_examples(self) -> Vec<Example> {
        self.examples
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}
