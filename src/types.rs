//! Core types for fmdt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix Azure DevOps puts on every branch ref
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Strip a leading `refs/heads/` from a ref name, if present
pub fn short_ref_name(ref_name: &str) -> &str {
    ref_name.strip_prefix(HEADS_PREFIX).unwrap_or(ref_name)
}

/// An Azure DevOps project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Project GUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// A Git repository inside a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository GUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the repository is disabled (disabled repos reject git/PR calls)
    pub is_disabled: bool,
    /// Name of the owning project
    pub project: String,
}

/// A completed pull request, reduced to what merge resolution needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Pull request id
    pub id: u64,
    /// Full source ref (`refs/heads/...`)
    pub source_ref: String,
    /// Full target ref (`refs/heads/...`)
    pub target_ref: String,
    /// When the PR was completed (None if the API omitted it)
    pub closed_date: Option<DateTime<Utc>>,
    /// Display name of the PR author
    pub author: String,
    /// Merge commit id, if the PR produced one
    pub merge_commit_id: Option<String>,
}

impl PullRequestRecord {
    /// Target branch name without the `refs/heads/` prefix
    pub fn target_branch(&self) -> &str {
        short_ref_name(self.target_ref.trim())
    }
}

/// Change counts between two branch tips, keyed by change type
/// (`Add`, `Edit`, `Delete`, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Count per change type; empty means no outstanding changes
    pub change_counts: BTreeMap<String, u64>,
}

impl ChangeSummary {
    /// True when the diff carries no change entries at all
    pub fn is_fully_merged(&self) -> bool {
        self.change_counts.is_empty()
    }

    /// Sum of all change counts
    pub fn total_changes(&self) -> u64 {
        self.change_counts.values().sum()
    }
}

/// One of the four downstream branches merge status is tracked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetBranch {
    /// `dev`
    Dev,
    /// `qa`
    Qa,
    /// `staging`
    Staging,
    /// `master` (or `main`)
    Master,
}

/// Branch names that map onto a slot other than their own name
const TARGET_ALIASES: &[(&str, TargetBranch)] = &[("main", TargetBranch::Master)];

impl TargetBranch {
    /// All targets in ladder order
    pub const ALL: [Self; 4] = [Self::Dev, Self::Qa, Self::Staging, Self::Master];

    /// Canonical branch name for this slot
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Qa => "qa",
            Self::Staging => "staging",
            Self::Master => "master",
        }
    }

    /// Match a branch name (with or without `refs/heads/`) to a slot.
    ///
    /// Comparison is case-insensitive and honours the alias table, so
    /// `refs/heads/Main` lands in [`TargetBranch::Master`]. Anything outside
    /// the ladder yields `None`.
    pub fn from_branch_name(name: &str) -> Option<Self> {
        let name = short_ref_name(name.trim()).to_lowercase();
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == name)
            .or_else(|| {
                TARGET_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|(_, target)| *target)
            })
    }
}

impl std::fmt::Display for TargetBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge state of a source branch against one target.
///
/// When `merged` is false, `date` and `merged_by` are always `None`; use the
/// constructors rather than building the struct by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentMergeState {
    /// Whether the branch is merged into this target
    pub merged: bool,
    /// Completion time of the PR that merged it
    pub date: Option<DateTime<Utc>>,
    /// Who merged it
    pub merged_by: Option<String>,
}

impl EnvironmentMergeState {
    /// Not merged, no date, no author
    pub const fn not_merged() -> Self {
        Self {
            merged: false,
            date: None,
            merged_by: None,
        }
    }

    /// Merged at `date` by `merged_by`
    pub const fn merged(date: Option<DateTime<Utc>>, merged_by: String) -> Self {
        Self {
            merged: true,
            date,
            merged_by: Some(merged_by),
        }
    }

    /// Drop back to the not-merged state
    pub fn reset(&mut self) {
        *self = Self::not_merged();
    }
}

/// Per-target merge states; all four keys are always present
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergedTo {
    /// State against `dev`
    pub dev: EnvironmentMergeState,
    /// State against `qa`
    pub qa: EnvironmentMergeState,
    /// State against `staging`
    pub staging: EnvironmentMergeState,
    /// State against `master`/`main`
    pub master: EnvironmentMergeState,
}

impl MergedTo {
    /// State for one target
    pub const fn get(&self, target: TargetBranch) -> &EnvironmentMergeState {
        match target {
            TargetBranch::Dev => &self.dev,
            TargetBranch::Qa => &self.qa,
            TargetBranch::Staging => &self.staging,
            TargetBranch::Master => &self.master,
        }
    }

    /// Mutable state for one target
    pub const fn get_mut(&mut self, target: TargetBranch) -> &mut EnvironmentMergeState {
        match target {
            TargetBranch::Dev => &mut self.dev,
            TargetBranch::Qa => &mut self.qa,
            TargetBranch::Staging => &mut self.staging,
            TargetBranch::Master => &mut self.master,
        }
    }

    /// Iterate `(target, state)` in ladder order
    pub fn iter(&self) -> impl Iterator<Item = (TargetBranch, &EnvironmentMergeState)> {
        TargetBranch::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    /// True if at least one target reports a merge
    pub fn any_merged(&self) -> bool {
        self.iter().any(|(_, state)| state.merged)
    }
}

/// Merge status of one branch in one repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BranchMergeStatus {
    /// Source branch name
    pub branch: String,
    /// Repository display name
    pub repository: String,
    /// State per target
    pub merged_to: MergedTo,
}

impl BranchMergeStatus {
    /// A status with every target unmerged
    pub fn unmerged(branch: &str, repository: &str) -> Self {
        Self {
            branch: branch.to_string(),
            repository: repository.to_string(),
            merged_to: MergedTo::default(),
        }
    }
}

/// Counts for one batch run.
///
/// `total == successful + failed + not_found()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
    /// Enabled repositories attempted
    pub total: usize,
    /// Repositories where the branch is merged somewhere
    pub successful: usize,
    /// Repositories whose resolution errored
    pub failed: usize,
    /// Names of the failed repositories, in listing order
    pub failed_repos: Vec<String>,
}

impl OperationSummary {
    /// Repositories queried successfully where the branch was not merged anywhere
    pub const fn not_found(&self) -> usize {
        self.total.saturating_sub(self.successful + self.failed)
    }
}

/// Result of resolving one branch across every repository in a project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Statuses for repositories where the branch is merged somewhere,
    /// in repository listing order
    pub statuses: Vec<BranchMergeStatus>,
    /// Counts for the run
    pub operation_summary: OperationSummary,
}

/// Branch names of one repository, as fetched for the branch cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryBranches {
    /// Repository GUID
    pub repository_id: String,
    /// Repository display name
    pub repository_name: String,
    /// Bare branch names (no `refs/heads/`)
    pub branches: Vec<String>,
    /// Fetch time, milliseconds since the Unix epoch
    pub fetched_at: i64,
}
