//! Migration framework
//!
//! Provides:
//! - Migration runner recording a checksum per applied migration
//! - Idempotent application, tamper detection on re-run
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
