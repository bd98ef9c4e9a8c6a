//! Canonical schema constants for structured logging and events
//!
//! Event names stamped by the log macros and the error field keys that
//! tests read back from captured events.

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FORCE_REFRESH: &str = "force_refresh";
