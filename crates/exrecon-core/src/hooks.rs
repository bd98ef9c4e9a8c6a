//! Collaborator interfaces of the engine
//!
//! The backing store and the views that must be re-synced after a change
//! are owned by the host application. The engine only sees these traits.

use std::sync::{Arc, Mutex};

use exrecon_core_types::SessionId;

use crate::errors::ExError;
use crate::model::Example;

/// Persistent store of training examples
pub trait BackingStore {
    /// All persisted examples of `intent` in `language`, whatever their entities
    ///
    /// # Errors
    ///
    /// Returns the store's own error; the engine surfaces it unchanged.
    fn fetch_examples(&self, intent: &str, language: &str) -> Result<Vec<Example>, ExError>;

    /// Persist the full working set as one atomic batch
    ///
    /// Deleted members are included so the store can remove them. Must be
    /// idempotent by id: the caller may retry after a failure.
    ///
    /// # Errors
    ///
    /// Returns the store's own error; the engine keeps its state and
    /// surfaces the error unchanged.
    fn commit_examples(
        &mut self,
        project_id: &str,
        language: &str,
        examples: &[Example],
    ) -> Result<(), ExError>;
}

/// Why views outside the session need to re-sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshReason {
    /// The focused example was deleted or restored
    DisplayedDeletionToggled,
    /// The focused example's content changed
    DisplayedEdited,
    /// Some example gained or lost canonical status
    CanonicalChanged,
}

/// Force-refresh event emitted by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshNotice {
    pub session_id: SessionId,
    pub reasons: Vec<RefreshReason>,
}

/// Consumer of force-refresh events (e.g. a conversation view)
pub trait RefreshListener {
    fn force_refresh(&self, notice: &RefreshNotice);
}

/// Ignores all notices
pub struct NoopRefreshListener;

impl RefreshListener for NoopRefreshListener {
    fn force_refresh(&self, _notice: &RefreshNotice) {}
}

/// Keeps every notice; for tests and for hosts that poll
#[derive(Default)]
pub struct RecordingRefreshListener {
    notices: Mutex<Vec<RefreshNotice>>,
}

impl RecordingRefreshListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<RefreshNotice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Every reason received so far, in arrival order
    pub fn reasons(&self) -> Vec<RefreshReason> {
        self.notices()
            .into_iter()
            .flat_map(|n| n.reasons)
            .collect()
    }
}

impl RefreshListener for RecordingRefreshListener {
    fn force_refresh(&self, notice: &RefreshNotice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

/// Lets a host keep a handle on a listener it hands to a session
impl<T: RefreshListener + ?Sized> RefreshListener for Arc<T> {
    fn force_refresh(&self, notice: &RefreshNotice) {
        (**self).force_refresh(notice);
    }
}
