//! Working-set reducer
//!
//! Every mutation of a working set ends here: the batch is applied, then
//! `invalid` and `is_displayed` are recomputed for every member and the set
//! is stably re-sorted. Keeping this the only path guarantees the validity
//! pass, the sort and the force-refresh signal can't be skipped.
//!
//! ## Display order
//!
//! 1. invalid examples
//! 2. new examples
//! 3. edited examples
//! 4. everything else
//!
//! Ties keep their relative input order.

use std::collections::HashSet;

use crate::errors::{ReconError, Result};
use crate::hooks::RefreshReason;
use crate::model::{Example, Payload};
use crate::ops::WorkingSet;
use crate::rules::payload_matches;

/// Session facts the reducer needs besides the set itself
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub payload: &'a Payload,
    /// Example currently focused by the host view, if any
    pub displayed_id: Option<&'a str>,
}

impl<'a> ReduceContext<'a> {
    pub fn new(payload: &'a Payload) -> Self {
        Self {
            payload,
            displayed_id: None,
        }
    }

    pub fn with_displayed(mut self, displayed_id: Option<&'a str>) -> Self {
        self.displayed_id = displayed_id;
        self
    }

    fn is_displayed(&self, id: &str) -> bool {
        self.displayed_id == Some(id)
    }
}

/// One atomic set of changes for a single reducer pass
#[derive(Debug, Clone, Default)]
pub struct Batch {
    front: Vec<Example>,
    replace: Vec<Example>,
    back: Vec<Example>,
    reasons: Vec<RefreshReason>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record ahead of the current members (new examples)
    pub fn insert_front(&mut self, example: Example) -> &mut Self {
        self.front.push(example);
        self
    }

    /// Replace the member with the same id, in place
    pub fn replace(&mut self, example: Example) -> &mut Self {
        self.replace.push(example);
        self
    }

    /// Add a record after the current members (store data)
    pub fn append(&mut self, example: Example) -> &mut Self {
        self.back.push(example);
        self
    }

    /// Request a force refresh regardless of what the pass detects
    pub fn force_refresh(&mut self, reason: RefreshReason) -> &mut Self {
        self.reasons.push(reason);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.replace.is_empty() && self.back.is_empty()
    }

    pub fn len(&self) -> usize {
        self.front.len() + self.replace.len() + self.back.len()
    }
}

/// Result of one reducer pass
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub set: WorkingSet,
    /// Distinct reasons, in first-seen order; empty when nothing downstream is affected
    pub refresh: Vec<RefreshReason>,
}

/// Apply `batch` to `current` and recompute flags and order
///
/// # Errors
///
/// * `ExampleNotFound` - a replacement names an id not in the set
/// * `DuplicateExample` - an added record reuses an id already present
pub fn reduce(current: WorkingSet, batch: Batch, ctx: &ReduceContext<'_>) -> Result<Reduced> {
    let Batch {
        front,
        replace,
        back,
        reasons,
    } = batch;

    let mut refresh = Vec::new();
    for reason in reasons {
        push_reason(&mut refresh, reason);
    }

    let mut members = current.examples;
    for updated in replace {
        let idx = members
            .iter()
            .position(|ex| ex.id == updated.id)
            .ok_or_else(|| ReconError::ExampleNotFound {
                example_id: updated.id.clone(),
            })?;

        if ctx.is_displayed(&updated.id) {
            let previous = &members[idx];
            if previous.provenance.deleted != updated.provenance.deleted {
                push_reason(&mut refresh, RefreshReason::DisplayedDeletionToggled);
            }
            if updated.provenance.edited && !previous.same_content(&updated) {
                push_reason(&mut refresh, RefreshReason::DisplayedEdited);
            }
        }
        members[idx] = updated;
    }

    let mut seen: HashSet<String> = members.iter().map(|ex| ex.id.clone()).collect();
    for added in front.iter().chain(back.iter()) {
        if !seen.insert(added.id.clone()) {
            return Err(ReconError::DuplicateExample {
                example_id: added.id.clone(),
            });
        }
    }

    let mut examples = Vec::with_capacity(front.len() + members.len() + back.len());
    examples.extend(front);
    examples.extend(members);
    examples.extend(back);

    for ex in &mut examples {
        ex.provenance.invalid = !payload_matches(ex, ctx.payload);
        ex.provenance.is_displayed = ctx.is_displayed(&ex.id);
    }

    // sort_by_key is stable
    examples.sort_by_key(display_rank);

    Ok(Reduced {
        set: WorkingSet { examples },
        refresh,
    })
}

/// Sort rank of an example in the display order (lower first)
pub fn display_rank(example: &Example) -> u8 {
    let p = &example.provenance;
    if p.invalid {
        0
    } else if p.is_new {
        1
    } else if p.edited {
        2
    } else {
        3
    }
}

fn push_reason(reasons: &mut Vec<RefreshReason>, reason: RefreshReason) {
    if !reasons.contains(&reason) {
        reasons.push(reason);
    }
}
