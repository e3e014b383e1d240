//! Persistence for the branch name cache in `branch-cache.json`.
//!
//! The cache feeds branch suggestions; it is never consulted by merge
//! resolution.

use super::write_file;
use crate::error::{Error, Result};
use crate::types::RepositoryBranches;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cache entries older than this are refreshed
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Filename for the cache file.
const CACHE_FILE: &str = "branch-cache.json";

/// Branch names for every repository, with the time they were fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCache {
    /// Milliseconds since the Unix epoch
    pub last_updated: i64,
    /// Per-repository branch lists
    pub repositories: Vec<RepositoryBranches>,
}

impl BranchCache {
    /// A cache stamped with the current time
    pub fn new(repositories: Vec<RepositoryBranches>) -> Self {
        Self {
            last_updated: Utc::now().timestamp_millis(),
            repositories,
        }
    }
}

/// Get path to the cache file.
pub fn branch_cache_path(dir: &Path) -> PathBuf {
    dir.join(CACHE_FILE)
}

/// Load the cache; `None` when missing or unparseable.
pub fn load_branch_cache(dir: &Path) -> Option<BranchCache> {
    let content = fs::read_to_string(branch_cache_path(dir)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save the cache, creating its directory if needed.
pub fn save_branch_cache(dir: &Path, cache: &BranchCache) -> Result<()> {
    let content = serde_json::to_string(cache)
        .map_err(|e| Error::Storage(format!("failed to serialize branch cache: {e}")))?;
    write_file(&branch_cache_path(dir), &content)
}

/// Whether the cache is older than `ttl` at time `now_ms`
pub fn is_cache_stale(cache: &BranchCache, ttl: Duration, now_ms: i64) -> bool {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now_ms.saturating_sub(cache.last_updated) > ttl_ms
}

/// Every branch name across repositories, deduplicated and sorted
pub fn unique_branches(repositories: &[RepositoryBranches]) -> Vec<String> {
    repositories
        .iter()
        .flat_map(|r| r.branches.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Case-insensitive substring matches of `filter`, at most `limit`
pub fn suggest_branches<'a>(branches: &'a [String], filter: &str, limit: usize) -> Vec<&'a str> {
    let needle = filter.trim().to_lowercase();
    branches
        .iter()
        .filter(|b| needle.is_empty() || b.to_lowercase().contains(&needle))
        .map(String::as_str)
        .take(limit)
        .collect()
}
