//! User settings for fundbook
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so a missing file or a partial one is fine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::FundbookPaths;
use crate::error::LedgerError;

/// How new account and transaction ids are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdMode {
    /// Random digits for accounts, random hex for transactions
    #[default]
    Random,
    /// Zero-padded counters starting at 1, for reproducible scripts
    Sequential,
}

/// User settings for fundbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Category list to load; `categories.json` in the base directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_file: Option<PathBuf>,

    #[serde(default)]
    pub id_mode: IdMode,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Newest settings layout this build understands
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            categories_file: None,
            id_mode: IdMode::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// The category file these settings point at
    pub fn categories_path(&self, paths: &FundbookPaths) -> PathBuf {
        self.categories_file
            .clone()
            .unwrap_or_else(|| paths.categories_file())
    }

    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FundbookPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.schema_version > SCHEMA_VERSION {
            return Err(LedgerError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                settings.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FundbookPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))
    }
}
