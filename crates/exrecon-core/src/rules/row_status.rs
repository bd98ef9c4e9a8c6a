//! Per-row modification label shown next to each example
//!
//! Precedence is deleted, then invalid, then new, then edited. Invalidity is
//! checked against the payload here rather than read from the stored flag,
//! so a label never lags behind an edit that has not been reduced yet.

use serde::{Deserialize, Serialize};

use crate::model::{Example, Payload};
use crate::rules::matching::payload_matches;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// Flagged deleted; removed from the store on commit
    Deleted,
    /// Intent or entity types differ from the payload
    Invalid,
    /// Not yet in the store
    New,
    Edited,
}

impl RowStatus {
    /// The label for `example`, or `None` for an untouched valid row
    pub fn of(example: &Example, payload: &Payload) -> Option<Self> {
        let p = &example.provenance;
        if p.deleted {
            Some(RowStatus::Deleted)
        } else if !payload_matches(example, payload) {
            Some(RowStatus::Invalid)
        } else if p.is_new {
            Some(RowStatus::New)
        } else if p.edited {
            Some(RowStatus::Edited)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Deleted => "deleted",
            RowStatus::Invalid => "invalid",
            RowStatus::New => "new",
            RowStatus::Edited => "edited",
        }
    }

    /// Longer hover text
    pub fn description(&self) -> &'static str {
        match self {
            RowStatus::Deleted => "Deleted example",
            RowStatus::Invalid => "Intent or entities do not match the payload",
            RowStatus::New => "New example",
            RowStatus::Edited => "Edited example",
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
