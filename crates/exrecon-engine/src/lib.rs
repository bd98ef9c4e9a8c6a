//! exrecon Engine - editing sessions over a backing store
//!
//! Ties the pure working-set logic of `exrecon-core` to a backing store and
//! to the host's force-refresh listener.

pub mod config;
pub mod session;

pub use config::EngineConfig;
pub use session::{CancelOutcome, CanonicalSwitch, CommitReceipt, EditingSession};

/// Result type alias using the structured error facility
pub type Result<T> = std::result::Result<T, exrecon_core::ExError>;
