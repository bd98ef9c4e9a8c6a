//! Commit gate
//!
//! Decides locally whether a working set may be handed to the store. It
//! fails closed: a refusal means no store call is made at all.

use crate::errors::{ReconError, Result};
use crate::ops::WorkingSet;
use crate::rules::invariants;

/// The predicate a refused commit failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPredicate {
    /// A non-deleted example does not match the session payload
    InvalidExamples,
}

impl std::fmt::Display for CommitPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitPredicate::InvalidExamples => f.write_str("invalid examples must be fixed or deleted"),
        }
    }
}

/// Check that `set` is safe to persist
///
/// Deleted examples are ignored; they are still part of what gets
/// committed. Canonical group conflicts never block a commit, see
/// [`WorkingSet::canonical_conflicts`].
///
/// # Errors
///
/// Returns `CommitRefused` with the ids of the live invalid examples.
pub fn check_commit(set: &WorkingSet) -> Result<()> {
    let invalid = invariants::find_live_invalid(set);
    if !invalid.is_empty() {
        return Err(ReconError::CommitRefused {
            predicate: CommitPredicate::InvalidExamples,
            example_ids: invalid,
        });
    }

    Ok(())
}
