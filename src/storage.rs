//! Persistence of processed job symbols.
//!
//! The history is the only durable state: a whole-file JSON document
//! holding the set of symbols already notified. It only ever grows.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::types::HistoryFile;

const HISTORY_PATH: &str = "data/history.json";

/// Manages the processed-jobs history file.
pub struct JobHistory {
    path: PathBuf,
}

impl JobHistory {
    pub fn new() -> Self {
        Self::with_path(HISTORY_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the set of processed symbols. A missing, unreadable, or
    /// corrupt file degrades to an empty set and never fails the caller.
    pub fn load(&self) -> HashSet<String> {
        if !self.path.exists() {
            return HashSet::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "error loading history");
                return HashSet::new();
            }
        };

        match serde_json::from_str::<HistoryFile>(&content) {
            Ok(file) => file.processed_jobs.into_iter().collect(),
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "error parsing history");
                HashSet::new()
            }
        }
    }

    /// Merge `new_symbols` into the stored history and rewrite the file.
    /// On write failure the previous file is left untouched; the next
    /// cycle recomputes from it and may re-notify.
    pub fn update(&self, new_symbols: &[String]) -> Result<()> {
        let mut merged = self.load();
        merged.extend(new_symbols.iter().cloned());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let file = HistoryFile {
            processed_jobs: merged.into_iter().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write history to {}", self.path.display()))?;

        info!(added = new_symbols.len(), "updated history");
        Ok(())
    }
}

impl Default for JobHistory {
    fn default() -> Self {
        Self::new()
    }
}
