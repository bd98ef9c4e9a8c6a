//! Engine configuration loaded from TOML
//!
//! ```toml
//! project_id = "default"
//! language = "en"
//! database_path = "data/examples.db"
//! log_profile = "production"
//! ```

use std::path::{Path, PathBuf};

use exrecon_core::errors::{ExError, ExErrorKind, ReconError};
use exrecon_core::logging_facility::{self, Profile};
use exrecon_store::SqliteExampleStore;
use serde::Deserialize;

use crate::Result;

fn default_project_id() -> String {
    "default".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Project the committed examples belong to
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Language of the examples under edit
    #[serde(default = "default_language")]
    pub language: String,
    /// SQLite file; an in-memory database when absent
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            language: default_language(),
            database_path: None,
            log_profile: Profile::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed TOML, unknown keys or empty ids.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text).map_err(|e| {
            ExError::from(ReconError::InvalidConfig {
                reason: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// A relative `database_path` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// `Io` if the file can't be read, otherwise as `from_toml_str`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(db), Some(dir)) = (config.database_path.as_ref(), path.parent()) {
            if db.is_relative() {
                config.database_path = Some(dir.join(db));
            }
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let empty = [("project_id", &self.project_id), ("language", &self.language)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());
        match empty {
            Some((field, _)) => Err(ReconError::InvalidConfig {
                reason: format!("{field} must not be empty"),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Install the global subscriber for `log_profile`
    pub fn init_logging(&self) {
        logging_facility::init(self.log_profile);
    }

    /// Open the configured SQLite store, migrating it if needed
    ///
    /// # Errors
    ///
    /// `Persistence` if the database cannot be opened or a migration fails;
    /// a changed migration checksum is refused the same way.
    pub fn open_store(&self) -> Result<SqliteExampleStore> {
        match &self.database_path {
            Some(path) => SqliteExampleStore::open(path),
            None => SqliteExampleStore::open_in_memory(),
        }
    }
}
