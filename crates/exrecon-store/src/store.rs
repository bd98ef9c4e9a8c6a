//! `BackingStore` implementation over SQLite

use std::path::Path;

use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;
use crate::repo::ExampleRepo;
use exrecon_core::errors::ExError;
use exrecon_core::hooks::BackingStore;
use exrecon_core::model::Example;
use rusqlite::Connection;
use serde::Serialize;

/// Row counts of the last accepted commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub upserted: usize,
    pub removed: usize,
}

/// SQLite-backed example store
///
/// ```
/// use exrecon_core::hooks::BackingStore;
/// use exrecon_store::SqliteExampleStore;
///
/// let store = SqliteExampleStore::open_in_memory().unwrap();
/// assert!(store.fetch_examples("greet", "en").unwrap().is_empty());
/// ```
pub struct SqliteExampleStore {
    conn: Connection,
    last_commit: Option<CommitSummary>,
}

impl SqliteExampleStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection; configures it and applies migrations
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn,
            last_commit: None,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn last_commit(&self) -> Option<CommitSummary> {
        self.last_commit
    }

    fn commit_batch(
        &mut self,
        project_id: &str,
        language: &str,
        examples: &[Example],
    ) -> Result<CommitSummary> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        let mut summary = CommitSummary::default();

        for example in examples {
            if example.is_deleted() {
                if ExampleRepo::delete_example_tx(&tx, &example.id)? {
                    summary.removed += 1;
                }
            } else {
                ExampleRepo::upsert_example_tx(&tx, project_id, language, example)?;
                summary.upserted += 1;
            }
        }

        ExampleRepo::log_commit_tx(&tx, project_id, language, summary.upserted, summary.removed)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(summary)
    }
}

impl BackingStore for SqliteExampleStore {
    fn fetch_examples(&self, intent: &str, language: &str) -> std::result::Result<Vec<Example>, ExError> {
        let examples = ExampleRepo::list_by_intent(&self.conn, intent, language)?;
        tracing::debug!(intent, language, count = examples.len(), "fetched examples");
        Ok(examples)
    }

    /// Deleted members are removed, all others upserted, in one transaction
    fn commit_examples(
        &mut self,
        project_id: &str,
        language: &str,
        examples: &[Example],
    ) -> std::result::Result<(), ExError> {
        let summary = self.commit_batch(project_id, language, examples)?;
        tracing::debug!(
            project_id,
            language,
            upserted = summary.upserted,
            removed = summary.removed,
            "committed examples"
        );
        self.last_commit = Some(summary);
        Ok(())
    }
}
