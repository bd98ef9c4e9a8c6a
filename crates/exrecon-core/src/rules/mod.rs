pub mod invariants;
pub mod matching;
pub mod row_status;

pub use matching::{payload_matches, same_canonical_group, CanonicalGroupKey};
pub use row_status::RowStatus;
