//! Persistence for the branch search history in `history.toml`.

use super::write_file;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of remembered branches
pub const MAX_HISTORY: usize = 50;

/// Filename for the history file.
const HISTORY_FILE: &str = "history.toml";

/// Recently searched branches, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    /// Branch names
    #[serde(default)]
    pub branches: Vec<String>,
}

/// Get path to the history file.
pub fn history_path(dir: &Path) -> PathBuf {
    dir.join(HISTORY_FILE)
}

/// Load history; a missing or unreadable file yields an empty history.
pub fn load_history(dir: &Path) -> SearchHistory {
    fs::read_to_string(history_path(dir))
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

/// Save history, creating its directory if needed.
pub fn save_history(dir: &Path, history: &SearchHistory) -> Result<()> {
    let content = toml::to_string_pretty(history)
        .map_err(|e| Error::Storage(format!("failed to serialize history: {e}")))?;
    write_file(&history_path(dir), &content)
}

/// Put `branch` at the front, dropping any older copy, capped at
/// [`MAX_HISTORY`].
pub fn add_to_history(branch: &str, history: &SearchHistory) -> SearchHistory {
    let branches = std::iter::once(branch.to_string())
        .chain(history.branches.iter().filter(|b| *b != branch).cloned())
        .take(MAX_HISTORY)
        .collect();
    SearchHistory { branches }
}
