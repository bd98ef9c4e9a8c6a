//! SQLite repository for training examples
//!
//! Entities and metadata are stored as JSON text columns. Provenance flags
//! belong to an editing session and never reach the table; loaded examples
//! always carry default provenance.

use crate::errors::{corrupt_row, encode_error, from_rusqlite, Result};
use exrecon_core::model::{EntityAnnotation, Example, ExampleMetadata};
use rusqlite::{Connection, OptionalExtension, Row, Transaction};

const SELECT_COLUMNS: &str = "SELECT id, text, intent, entities, metadata FROM examples";

/// Raw row before JSON decoding
struct ExampleRow {
    id: String,
    text: String,
    intent: String,
    entities: String,
    metadata: String,
}

impl ExampleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            intent: row.get(2)?,
            entities: row.get(3)?,
            metadata: row.get(4)?,
        })
    }

    fn decode(self) -> Result<Example> {
        let entities: Vec<EntityAnnotation> = serde_json::from_str(&self.entities)
            .map_err(|e| corrupt_row(&self.id, "entities", e))?;
        let metadata: ExampleMetadata = serde_json::from_str(&self.metadata)
            .map_err(|e| corrupt_row(&self.id, "metadata", e))?;

        let mut example = Example::new(self.id, self.text, self.intent).with_metadata(metadata);
        example.entities = entities;
        Ok(example)
    }
}

pub struct ExampleRepo;

impl ExampleRepo {
    /// Insert or update an example within a transaction
    ///
    /// An existing row keeps its insertion position and creation time.
    pub fn upsert_example_tx(
        tx: &Transaction,
        project_id: &str,
        language: &str,
        example: &Example,
    ) -> Result<()> {
        let entities =
            serde_json::to_string(&example.entities).map_err(|e| encode_error(&example.id, e))?;
        let metadata =
            serde_json::to_string(&example.metadata).map_err(|e| encode_error(&example.id, e))?;
        let now = chrono::Utc::now().timestamp();

        tx.execute(
            "INSERT INTO examples (id, project_id, language, intent, text, entities, metadata, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(id) DO UPDATE SET
                project_id = excluded.project_id,
                language = excluded.language,
                intent = excluded.intent,
                text = excluded.text,
                entities = excluded.entities,
                metadata = excluded.metadata,
                updated_at = excluded.updated_at",
            rusqlite::params![
                example.id,
                project_id,
                language,
                example.intent,
                example.text,
                entities,
                metadata,
                now,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Delete an example by id within a transaction
    ///
    /// Returns false when no row existed (e.g. a new example deleted before
    /// it was ever saved).
    pub fn delete_example_tx(tx: &Transaction, example_id: &str) -> Result<bool> {
        let removed = tx
            .execute("DELETE FROM examples WHERE id = ?1", [example_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Record an accepted commit
    pub fn log_commit_tx(
        tx: &Transaction,
        project_id: &str,
        language: &str,
        upserted: usize,
        removed: usize,
    ) -> Result<()> {
        tx.execute(
            "INSERT INTO commit_log (project_id, language, upserted, removed, committed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                project_id,
                language,
                upserted as i64,
                removed as i64,
                chrono::Utc::now().timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// All examples of `intent` in `language`, in insertion order
    pub fn list_by_intent(conn: &Connection, intent: &str, language: &str) -> Result<Vec<Example>> {
        let sql = format!("{SELECT_COLUMNS} WHERE intent = ?1 AND language = ?2 ORDER BY seq");
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([intent, language], ExampleRow::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(ExampleRow::decode).collect()
    }

    pub fn get_example(conn: &Connection, example_id: &str) -> Result<Option<Example>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = conn
            .query_row(&sql, [example_id], ExampleRow::from_row)
            .optional()
            .map_err(from_rusqlite)?;
        row.map(ExampleRow::decode).transpose()
    }

    pub fn count_examples(conn: &Connection) -> Result<usize> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM examples", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }

    pub fn count_commits(conn: &Connection) -> Result<usize> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM commit_log", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }
}
