//! Local persistence: config file, search history and branch cache.
//!
//! Every function takes the directory it works in, so tests can point it at
//! a temp dir. [`default_config_dir`] and [`default_cache_dir`] give the
//! real locations.

mod branch_cache;
mod config_file;
mod history;

pub use branch_cache::{
    BranchCache, DEFAULT_CACHE_TTL, branch_cache_path, is_cache_stale, load_branch_cache,
    save_branch_cache, suggest_branches, unique_branches,
};
pub use config_file::{CONFIG_VERSION, FileConfig, config_path, load_config, save_config};
pub use history::{
    MAX_HISTORY, SearchHistory, add_to_history, history_path, load_history, save_history,
};

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config/cache dirs
const APP_DIR: &str = "fmdt";

/// `<config dir>/fmdt`, e.g. `~/.config/fmdt`
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| Error::Storage("could not determine config directory".to_string()))
}

/// `<cache dir>/fmdt`, e.g. `~/.cache/fmdt`
pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| Error::Storage("could not determine cache directory".to_string()))
}

/// Write `content` to `path`, creating the parent directory first.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Storage(format!("failed to create {}: {e}", dir.display())))?;
        }
    }

    fs::write(path, content)
        .map_err(|e| Error::Storage(format!("failed to write {}: {e}", path.display())))
}
