//! Functional-boundary apply function
//!
//! `apply()` is the only way a working set changes. It plans a batch for
//! the command and runs it through the reducer in a single pass.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: a command either yields a complete new state or an
//!   error; two-record changes (canonical hand-over) are never observable
//!   half-applied
//! - **No panics**: bad input returns typed errors
//! - **Ownership**: the state is consumed; callers that need the old state
//!   on failure keep a clone (the engine session does)
//!
//! ## Example
//!
//! ```
//! use exrecon_core::{apply, Candidate, Command, Payload, ReduceContext, WorkingSet};
//!
//! let payload = Payload::new("greet", Vec::<String>::new());
//! let ctx = ReduceContext::new(&payload);
//! let cmd = Command::Insert { candidates: vec![Candidate::new("hello", "greet")] };
//!
//! let applied = apply(WorkingSet::new(), cmd, &ctx).unwrap();
//! assert_eq!(applied.state.len(), 1);
//! assert!(applied.state.examples()[0].metadata.canonical);
//! ```

use crate::commands::{Command, CommandOutcome};
use crate::errors::Result;
use crate::hooks::RefreshReason;
use crate::ops::{canonical_ops, delete_ops, edit_ops, insert_ops, merge_ops, WorkingSet};
use crate::reducer::{reduce, Batch, ReduceContext};

/// Result of a successfully applied command
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub state: WorkingSet,
    pub outcome: CommandOutcome,
    /// Reasons external views must re-sync; empty when none
    pub refresh: Vec<RefreshReason>,
}

/// Apply a command to a working set, returning the new state
///
/// # Errors
///
/// * `ExampleNotFound` - a command names an id not in the set
/// * `ExampleDeleted` - edit or switch-canonical on a deleted example
/// * `DuplicateExample` - an inserted candidate reuses a present id
pub fn apply(state: WorkingSet, cmd: Command, ctx: &ReduceContext<'_>) -> Result<Applied> {
    let (batch, outcome): (Batch, CommandOutcome) = match cmd {
        Command::Merge { examples } => {
            let (batch, appended) = merge_ops::plan_merge(&state, examples, ctx.payload);
            (batch, CommandOutcome::Merged { appended })
        }

        Command::Insert { candidates } => {
            let (batch, example_ids) = insert_ops::plan_insert(&state, candidates, ctx.payload)?;
            (batch, CommandOutcome::Inserted { example_ids })
        }

        Command::Edit { examples } => {
            let (batch, changed) = edit_ops::plan_edit(&state, examples, ctx.payload)?;
            (batch, CommandOutcome::Edited { changed })
        }

        Command::ToggleDelete { example_ids } => {
            let (batch, toggled) = delete_ops::plan_toggle_delete(&state, &example_ids)?;
            (
                batch,
                CommandOutcome::DeleteToggled {
                    example_ids: toggled,
                },
            )
        }

        Command::SwitchCanonical { example_id } => {
            let (batch, cleared_old_canonical) =
                canonical_ops::plan_switch_canonical(&state, &example_id)?;
            (
                batch,
                CommandOutcome::CanonicalSwitched {
                    cleared_old_canonical,
                },
            )
        }
    };

    let reduced = reduce(state, batch, ctx)?;
    Ok(Applied {
        state: reduced.set,
        outcome,
        refresh: reduced.refresh,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::errors::ReconError;
    use crate::model::{Candidate, EntityAnnotation, Example, ExampleMetadata, Payload};

    fn payload() -> Payload {
        Payload::new("book_flight", ["city"])
    }

    fn stored(id: &str) -> Example {
        Example::new(id, format!("fly {id}"), "book_flight")
            .with_entity(EntityAnnotation::new("city", "Rome"))
    }

    #[test]
    fn test_apply_merge_then_insert() {
        let p = payload();
        let ctx = ReduceContext::new(&p);

        let applied = apply(
            WorkingSet::new(),
            Command::Merge {
                examples: vec![stored("1").with_metadata(ExampleMetadata::canonical())],
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(applied.outcome, CommandOutcome::Merged { appended: 1 });

        let candidate =
            Candidate::new("to Oslo", "book_flight").with_entity(EntityAnnotation::new("city", "Oslo"));
        let applied = apply(
            applied.state,
            Command::Insert {
                candidates: vec![candidate],
            },
            &ctx,
        )
        .unwrap();

        let first = &applied.state.examples()[0];
        assert!(first.provenance.is_new);
        assert!(!first.metadata.canonical);
        assert!(applied.refresh.is_empty());
    }

    #[test]
    fn test_apply_switch_canonical_reports_clear() {
        let p = payload();
        let ctx = ReduceContext::new(&p);
        let set = WorkingSet::from_examples(vec![
            stored("1").with_metadata(ExampleMetadata::canonical()),
            stored("2"),
        ]);

        let applied = apply(
            set,
            Command::SwitchCanonical {
                example_id: "2".to_string(),
            },
            &ctx,
        )
        .unwrap();

        assert_eq!(
            applied.outcome,
            CommandOutcome::CanonicalSwitched {
                cleared_old_canonical: true
            }
        );
        assert!(!applied.state.get("1").unwrap().metadata.canonical);
        assert!(applied.state.get("2").unwrap().metadata.canonical);
        assert_eq!(applied.refresh, vec![RefreshReason::CanonicalChanged]);
    }

    #[test]
    fn test_apply_atomic_on_error() {
        let p = payload();
        let ctx = ReduceContext::new(&p);
        let set = WorkingSet::from_examples(vec![stored("1")]);

        let result = apply(
            set.clone(),
            Command::ToggleDelete {
                example_ids: vec!["1".to_string(), "missing".to_string()],
            },
            &ctx,
        );

        assert!(matches!(result, Err(ReconError::ExampleNotFound { .. })));
        assert!(!set.get("1").unwrap().is_deleted());
    }
}
