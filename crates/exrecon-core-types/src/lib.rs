//! Core types shared across exrecon facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of the reconciliation engine:
//!
//! - **Correlation types**: SessionId, RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, SessionId, TraceId};
