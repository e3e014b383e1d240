//! Persistence for `config.toml`.

use super::write_file;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current config file version, for future migrations
pub const CONFIG_VERSION: &str = "1.0.0";

/// Filename for the config file.
const CONFIG_FILE: &str = "config.toml";

/// On-disk settings; the credential is never stored here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Organization name
    pub organization: String,
    /// Project name
    pub project: String,
    /// File format version
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            project: String::new(),
            version: default_version(),
        }
    }
}

/// Get path to the config file.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Load the config file.
///
/// Returns `None` if it doesn't exist.
pub fn load_config(dir: &Path) -> Result<Option<FileConfig>> {
    let path = config_path(dir);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: FileConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    Ok(Some(config))
}

/// Save the config file, creating its directory if needed.
pub fn save_config(dir: &Path, config: &FileConfig) -> Result<()> {
    if config.organization.trim().is_empty() || config.project.trim().is_empty() {
        return Err(Error::Config(
            "organization and project must not be empty".to_string(),
        ));
    }

    let mut to_save = config.clone();
    to_save.version = CONFIG_VERSION.to_string();

    let content = toml::to_string_pretty(&to_save)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

    let content_with_header = format!(
        "# fmdt configuration\n# The access token is read from AZURE_DEVOPS_PAT or the az CLI, never from this file\n\n{content}"
    );

    write_file(&config_path(dir), &content_with_header)
}
