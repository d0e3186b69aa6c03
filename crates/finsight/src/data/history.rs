//! Paycheck simulation history
//!
//! Saved simulations are appended to `{data_dir}/history.yaml`. Saving is a
//! side effect of the `paycheck --save` command and can never change the
//! calculation it records: failures are logged and swallowed by
//! [`record_paycheck`].

use std::fs;
use std::path::{Path, PathBuf};

use finsight_core::model::{PaycheckBreakdown, Recurrence, SimulationResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

pub const HISTORY_FILE_NAME: &str = "history.yaml";

/// Error types for history storage
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// One saved paycheck simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub recorded_at: Timestamp,
    /// Household file the simulation was run for
    pub household: String,
    pub pay_period: Recurrence,
    pub result: SimulationResult,
    pub per_period: PaycheckBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

pub fn history_path(data_dir: &Path) -> PathBuf {
    data_dir.join(HISTORY_FILE_NAME)
}

/// Load saved history; a missing file is an empty history
pub fn load_history(data_dir: &Path) -> Result<History, StorageError> {
    let path = history_path(data_dir);
    if !path.exists() {
        return Ok(History::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| StorageError::Io(format!("Failed to read history: {e}")))?;
    serde_saphyr::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse history: {e}")))
}

/// Append an entry and rewrite the history file atomically
pub fn append_entry(data_dir: &Path, entry: HistoryEntry) -> Result<usize, StorageError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| StorageError::Io(format!("Failed to create data directory: {e}")))?;

    let mut history = load_history(data_dir)?;
    history.entries.push(entry);

    let yaml = serde_saphyr::to_string(&history)
        .map_err(|e| StorageError::Serialize(format!("Failed to serialize history: {e}")))?;
    atomic_write(&history_path(data_dir), &yaml)
        .map_err(|e| StorageError::Io(format!("Failed to write history: {e}")))?;

    Ok(history.entries.len())
}

/// Save a simulation, logging instead of failing. Returns whether it was saved.
pub fn record_paycheck(data_dir: &Path, entry: HistoryEntry) -> bool {
    match append_entry(data_dir, entry) {
        Ok(count) => {
            tracing::info!(entries = count, "Saved paycheck simulation to history");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to save paycheck history");
            false
        }
    }
}
