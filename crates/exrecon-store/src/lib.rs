//! exrecon Store - SQLite backing store for training examples
//!
//! Provides:
//! - Connection helpers
//! - Checksummed embedded migrations
//! - Example repository (row <-> `Example` mapping)
//! - `SqliteExampleStore`, the `BackingStore` used by editing sessions

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod store;

pub use errors::Result;
pub use store::{CommitSummary, SqliteExampleStore};
