//! Editing session
//!
//! One session edits the examples of a single payload (intent plus entity
//! types). It owns its working set from `open` until a successful `commit`,
//! a clean `cancel` or an explicit `discard`. Every mutation goes through
//! `exrecon_core::apply`; the session only adds store I/O, logging and
//! force-refresh fan-out.
//!
//! A failed operation leaves the working set exactly as it was.

use std::time::Instant;

use exrecon_core::errors::{ExError, ReconError};
use exrecon_core::hooks::{
    BackingStore, NoopRefreshListener, RefreshListener, RefreshNotice, RefreshReason,
};
use exrecon_core::model::{Candidate, Example, Payload};
use exrecon_core::reducer::{reduce, Batch, ReduceContext};
use exrecon_core::{apply, check_commit, log_op_end, log_op_error, log_op_start};
use exrecon_core::{Command, CommandOutcome, WorkingSet};
use exrecon_core_types::schema::EVENT_FORCE_REFRESH;
use exrecon_core_types::{RequestContext, SessionId, TraceId};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::Result;

/// Result of `switch_canonical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalSwitch {
    /// Another example of the group lost canonical status
    pub cleared_old_canonical: bool,
}

/// Result of a successful commit; the session is closed afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    pub session_id: SessionId,
    /// Examples handed to the store, deleted ones included
    pub committed: usize,
    pub deleted: usize,
    /// Some operation asked views to re-sync; reload them after the save
    pub refresh_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancelOutcome {
    /// True when the session stayed open because discarding would lose work
    pub has_unsaved_changes: bool,
}

enum SessionState {
    Open(WorkingSet),
    Closed,
}

pub struct EditingSession {
    id: SessionId,
    payload: Payload,
    project_id: String,
    language: String,
    displayed_id: Option<String>,
    state: SessionState,
    listener: Box<dyn RefreshListener>,
    refresh_pending: bool,
    trace_id: Option<TraceId>,
}

impl EditingSession {
    /// Open an empty session for `payload`
    ///
    /// Call `load` to bring in the store's examples.
    pub fn open(config: &EngineConfig, payload: Payload) -> Self {
        let id = SessionId::new();
        tracing::debug!(
            session_id = id.as_str(),
            intent = payload.intent.as_str(),
            language = config.language.as_str(),
            "session opened"
        );
        Self {
            id,
            payload,
            project_id: config.project_id.clone(),
            language: config.language.clone(),
            displayed_id: None,
            state: SessionState::Open(WorkingSet::new()),
            listener: Box::new(NoopRefreshListener),
            refresh_pending: false,
            trace_id: None,
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn RefreshListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Propagate an upstream trace id into every request of this session
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// True once any operation raised a force-refresh in this session
    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// # Errors
    ///
    /// `SessionClosed` after commit, clean cancel or discard.
    pub fn working_set(&self) -> Result<&WorkingSet> {
        match &self.state {
            SessionState::Open(set) => Ok(set),
            SessionState::Closed => Err(self.closed_error()),
        }
    }

    /// # Errors
    ///
    /// `SessionClosed` once the session is closed.
    pub fn has_unsaved_changes(&self) -> Result<bool> {
        Ok(self.working_set()?.has_unsaved_changes())
    }

    /// # Errors
    ///
    /// `SessionClosed` once the session is closed.
    pub fn has_invalid_examples(&self) -> Result<bool> {
        Ok(self.working_set()?.has_invalid_examples())
    }

    /// Set the example the host view currently shows
    ///
    /// Only changes to this example raise displayed-example refresh reasons.
    ///
    /// # Errors
    ///
    /// `SessionClosed` once the session is closed.
    pub fn set_displayed(&mut self, example_id: Option<String>) -> Result<()> {
        let set = self.working_set()?.clone();
        self.displayed_id = example_id;
        let ctx = ReduceContext::new(&self.payload).with_displayed(self.displayed_id.as_deref());
        let reduced = reduce(set, Batch::new(), &ctx).map_err(ExError::from)?;
        self.state = SessionState::Open(reduced.set);
        Ok(())
    }

    /// Fetch the payload intent's examples from `store` and merge them in
    ///
    /// Returns the number of examples appended. A store failure is returned
    /// unchanged and leaves the working set untouched.
    ///
    /// # Errors
    ///
    /// * `SessionClosed` - the session is no longer open; the store is not called
    /// * any error of `fetch_examples`
    pub fn load(&mut self, store: &dyn BackingStore) -> Result<usize> {
        const OP: &str = "load";
        let start = Instant::now();
        let request = self.request();
        log_op_start!(
            OP,
            session_id = self.id.as_str(),
            request_id = request.request_id.as_str(),
            intent = self.payload.intent.as_str()
        );

        let result = self.fetch_and_merge(store);
        finish(OP, start, &request, result).map(|outcome| match outcome {
            CommandOutcome::Merged { appended } => appended,
            _ => 0,
        })
    }

    fn fetch_and_merge(&mut self, store: &dyn BackingStore) -> Result<CommandOutcome> {
        self.working_set()?;
        let fetched = store.fetch_examples(&self.payload.intent, &self.language)?;
        self.run(Command::Merge { examples: fetched })
    }

    /// Merge an already fetched store batch
    ///
    /// # Errors
    ///
    /// `SessionClosed` once the session is closed.
    pub fn merge(&mut self, examples: Vec<Example>) -> Result<usize> {
        match self.logged(Command::Merge { examples })? {
            CommandOutcome::Merged { appended } => Ok(appended),
            _ => Ok(0),
        }
    }

    /// Insert candidates at the top of the set; returns their ids
    ///
    /// # Errors
    ///
    /// * `AlreadyExists` - a candidate id is already in the set
    /// * `SessionClosed` - the session is no longer open
    pub fn insert(&mut self, candidates: Vec<Candidate>) -> Result<Vec<String>> {
        match self.logged(Command::Insert { candidates })? {
            CommandOutcome::Inserted { example_ids } => Ok(example_ids),
            _ => Ok(Vec::new()),
        }
    }

    /// Apply content edits; returns how many examples actually changed
    ///
    /// # Errors
    ///
    /// * `NotFound` / `Deleted` - a target is missing or flagged deleted
    /// * `SessionClosed` - the session is no longer open
    pub fn edit(&mut self, examples: Vec<Example>) -> Result<usize> {
        match self.logged(Command::Edit { examples })? {
            CommandOutcome::Edited { changed } => Ok(changed),
            _ => Ok(0),
        }
    }

    /// Flip the deleted flag of each id; returns the ids toggled
    ///
    /// # Errors
    ///
    /// * `NotFound` - an id is not in the set; nothing is toggled
    /// * `SessionClosed` - the session is no longer open
    pub fn toggle_delete(&mut self, example_ids: Vec<String>) -> Result<Vec<String>> {
        match self.logged(Command::ToggleDelete { example_ids })? {
            CommandOutcome::DeleteToggled { example_ids } => Ok(example_ids),
            _ => Ok(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// * `NotFound` / `Deleted` - the target is missing or flagged deleted
    /// * `SessionClosed` - the session is no longer open
    pub fn switch_canonical(&mut self, example_id: impl Into<String>) -> Result<CanonicalSwitch> {
        let cmd = Command::SwitchCanonical {
            example_id: example_id.into(),
        };
        match self.logged(cmd)? {
            CommandOutcome::CanonicalSwitched {
                cleared_old_canonical,
            } => Ok(CanonicalSwitch {
                cleared_old_canonical,
            }),
            _ => Ok(CanonicalSwitch {
                cleared_old_canonical: false,
            }),
        }
    }

    /// Persist the whole working set and close the session
    ///
    /// The commit gate runs first; a refusal never reaches the store. A
    /// store failure is returned unchanged and the session stays open with
    /// its working set intact, so the caller may retry.
    ///
    /// # Errors
    ///
    /// * `CommitRefused` - a live example does not match the payload
    /// * `SessionClosed` - the session is no longer open
    /// * any error of the store
    pub fn commit(&mut self, store: &mut dyn BackingStore) -> Result<CommitReceipt> {
        const OP: &str = "commit";
        let start = Instant::now();
        let request = self.request();
        log_op_start!(
            OP,
            session_id = self.id.as_str(),
            request_id = request.request_id.as_str(),
            project_id = self.project_id.as_str()
        );

        let result = self.try_commit(store);
        if let Ok(receipt) = &result {
            self.state = SessionState::Closed;
            tracing::debug!(
                session_id = self.id.as_str(),
                committed = receipt.committed,
                deleted = receipt.deleted,
                "session committed"
            );
        }
        finish(OP, start, &request, result)
    }

    fn try_commit(&self, store: &mut dyn BackingStore) -> Result<CommitReceipt> {
        let set = self.working_set()?;
        check_commit(set).map_err(|e| ExError::from(e).with_op("commit_gate"))?;

        store.commit_examples(&self.project_id, &self.language, set.examples())?;

        Ok(CommitReceipt {
            session_id: self.id.clone(),
            committed: set.len(),
            deleted: set.iter().filter(|ex| ex.is_deleted()).count(),
            refresh_pending: self.refresh_pending,
        })
    }

    /// Ask to leave the session
    ///
    /// With no unsaved changes the session is discarded at once. Otherwise
    /// it stays open and the caller must confirm with `discard`.
    ///
    /// # Errors
    ///
    /// `SessionClosed` once the session is closed.
    pub fn cancel(&mut self) -> Result<CancelOutcome> {
        const OP: &str = "cancel";
        let start = Instant::now();
        let request = self.request();
        log_op_start!(OP, session_id = self.id.as_str(), request_id = request.request_id.as_str());

        let result = self.has_unsaved_changes().map(|has_unsaved_changes| {
            if !has_unsaved_changes {
                self.state = SessionState::Closed;
            }
            CancelOutcome {
                has_unsaved_changes,
            }
        });
        finish(OP, start, &request, result)
    }

    /// Drop the working set and every unsaved change
    ///
    /// # Errors
    ///
    /// `SessionClosed` if it was already closed.
    pub fn discard(&mut self) -> Result<()> {
        const OP: &str = "discard";
        let start = Instant::now();
        let request = self.request();
        log_op_start!(OP, session_id = self.id.as_str(), request_id = request.request_id.as_str());

        let result = self.working_set().map(|_| ());
        if result.is_ok() {
            self.state = SessionState::Closed;
        }
        finish(OP, start, &request, result)
    }

    /// Run a command under the canonical op logging
    fn logged(&mut self, cmd: Command) -> Result<CommandOutcome> {
        let op = cmd.op_name();
        let start = Instant::now();
        let request = self.request();
        log_op_start!(
            op,
            session_id = self.id.as_str(),
            request_id = request.request_id.as_str(),
            batch_len = cmd.batch_len()
        );
        let result = self.run(cmd);
        finish(op, start, &request, result)
    }

    /// Apply a command and fan out any force-refresh it raises
    fn run(&mut self, cmd: Command) -> Result<CommandOutcome> {
        let op = cmd.op_name();
        let set = self.working_set()?.clone();
        let ctx = ReduceContext::new(&self.payload).with_displayed(self.displayed_id.as_deref());

        let applied = apply(set, cmd, &ctx).map_err(|e| ExError::from(e).with_op(op))?;

        self.state = SessionState::Open(applied.state);
        self.notify(applied.refresh);
        Ok(applied.outcome)
    }

    fn notify(&mut self, reasons: Vec<RefreshReason>) {
        if reasons.is_empty() {
            return;
        }
        self.refresh_pending = true;
        tracing::info!(
            event = EVENT_FORCE_REFRESH,
            session_id = self.id.as_str(),
            reasons = ?reasons,
        );
        self.listener.force_refresh(&RefreshNotice {
            session_id: self.id.clone(),
            reasons,
        });
    }

    fn request(&self) -> RequestContext {
        let request = RequestContext::new();
        match &self.trace_id {
            Some(trace_id) => request.with_trace_id(trace_id.clone()),
            None => request,
        }
    }

    fn closed_error(&self) -> ExError {
        ReconError::SessionClosed {
            session_id: self.id.to_string(),
        }
        .into()
    }
}

/// Emit the end or end_error event for `op` and pass the result through
///
/// Errors gain the request's correlation ids; kind, code and message are
/// left as the failing layer set them.
fn finish<T>(op: &str, start: Instant, request: &RequestContext, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    let result = result.map_err(|e| {
        let e = e.with_request_id(request.request_id.clone());
        match &request.trace_id {
            Some(trace_id) => e.with_trace_id(trace_id.clone()),
            None => e,
        }
    });
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }
    result
}
