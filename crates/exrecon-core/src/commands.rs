//! Command inventory
//!
//! Every working-set mutation is expressed as a `Command` and executed by
//! `apply()`.

use crate::model::{Candidate, Example};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Reconcile examples fetched from the backing store
    Merge { examples: Vec<Example> },

    /// Add new candidates at the top of the set
    Insert { candidates: Vec<Candidate> },

    /// Change content of existing examples
    Edit { examples: Vec<Example> },

    /// Flip the deleted flag of each example
    ToggleDelete { example_ids: Vec<String> },

    /// Toggle canonical status, clearing any other holder of the group
    SwitchCanonical { example_id: String },
}

impl Command {
    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::Merge { .. } => "merge",
            Command::Insert { .. } => "insert",
            Command::Edit { .. } => "edit",
            Command::ToggleDelete { .. } => "toggle_delete",
            Command::SwitchCanonical { .. } => "switch_canonical",
        }
    }

    /// Number of records the command carries
    pub fn batch_len(&self) -> usize {
        match self {
            Command::Merge { examples } | Command::Edit { examples } => examples.len(),
            Command::Insert { candidates } => candidates.len(),
            Command::ToggleDelete { example_ids } => example_ids.len(),
            Command::SwitchCanonical { .. } => 1,
        }
    }
}

/// What a successfully applied command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Merged { appended: usize },
    /// Ids assigned to the inserted candidates, in input order
    Inserted { example_ids: Vec<String> },
    /// Number of examples whose content actually changed
    Edited { changed: usize },
    DeleteToggled { example_ids: Vec<String> },
    CanonicalSwitched { cleared_old_canonical: bool },
}
