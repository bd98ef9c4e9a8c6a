//! Mutation planning
//!
//! Each operation reads the current working set and plans one `Batch`;
//! nothing here mutates the set. `apply()` hands the batch to the reducer.

pub mod canonical_ops;
pub mod delete_ops;
pub mod edit_ops;
pub mod insert_ops;
pub mod merge_ops;
pub mod working_set;

pub use working_set::WorkingSet;
