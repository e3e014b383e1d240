//! Merge resolution engine
//!
//! Three phases per repository:
//! 1. Gather - fetch completed PRs for the branch (effectful)
//! 2. Derive - best-guess status from PR history (pure, testable)
//! 3. Validate - confirm each claimed merge with a diff (effectful)
//!
//! [`batch_branch_merge_status`] runs that for every repository at once.

mod batch;
mod history;
mod validate;

pub use batch::{aggregate_outcomes, batch_branch_merge_status, collect_all_branches};
pub use history::{HistoryClaims, derive_status_from_history};
pub use validate::validate_with_diff;

use crate::error::{Error, Result};
use crate::platform::DevOpsService;
use crate::types::{BranchMergeStatus, Repository, short_ref_name};
use tracing::debug;

/// Clean up user input: trim, drop a pasted `refs/heads/`, reject empty
pub fn normalize_branch_name(input: &str) -> Result<String> {
    let branch = short_ref_name(input.trim()).trim();
    if branch.is_empty() {
        return Err(Error::InvalidBranch(
            "branch name must not be empty".to_string(),
        ));
    }
    Ok(branch.to_string())
}

/// Resolve the merge status of `branch` in one repository
///
/// The branch name is normalized first, so a pasted `refs/heads/...` works.
/// Errors fetching PRs propagate; diff failures only downgrade slots.
pub async fn resolve_branch_status(
    service: &dyn DevOpsService,
    repository: &Repository,
    branch: &str,
) -> Result<BranchMergeStatus> {
    let branch = normalize_branch_name(branch)?;
    let branch = branch.as_str();

    let records = service
        .list_completed_pull_requests(&repository.id, branch)
        .await?;

    if records.is_empty() {
        debug!(repository = %repository.name, branch, "no completed PRs");
        return Ok(BranchMergeStatus::unmerged(branch, &repository.name));
    }

    debug!(
        repository = %repository.name,
        branch,
        count = records.len(),
        "deriving status from completed PRs"
    );
    let claims = derive_status_from_history(branch, &repository.name, &records);
    Ok(validate_with_diff(service, &repository.id, claims).await)
}
