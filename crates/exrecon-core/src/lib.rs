//! exrecon core - example reconciliation kernel
//!
//! Pure, in-memory logic for curating training examples against one target
//! payload (intent + entity-type set):
//! - Example, Candidate and Payload models with transient edit provenance
//! - Payload matching and canonical grouping rules
//! - The working-set reducer (validity pass + display sort)
//! - Mutation planning: insert, edit, delete toggle, switch canonical, merge
//! - The commit gate
//! - `apply()`, the single gateway from commands to new working sets
//! - Error and logging facilities shared with the store and engine crates

pub mod apply;
pub mod commands;
pub mod commit_gate;
pub mod errors;
pub mod hooks;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod reducer;
pub mod rules;

#[doc(hidden)]
pub use exrecon_core_types as __core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use apply::{apply, Applied};
pub use commands::{Command, CommandOutcome};
pub use commit_gate::{check_commit, CommitPredicate};
pub use errors::{ExError, ExErrorKind, ReconError, Result};
pub use hooks::{BackingStore, RefreshListener, RefreshNotice, RefreshReason};
pub use model::{Candidate, EntityAnnotation, Example, ExampleMetadata, Payload, Provenance};
pub use ops::WorkingSet;
pub use reducer::{reduce, Batch, ReduceContext, Reduced};
pub use rules::{CanonicalGroupKey, RowStatus};
