//! Diff validation - effectful confirmation of history claims
//!
//! A PR record only says a merge happened once. The target may since have
//! been reset or the merge reverted, so every claimed slot is checked
//! against the current branch tips.

use crate::merge::history::HistoryClaims;
use crate::platform::DevOpsService;
use crate::types::{BranchMergeStatus, TargetBranch};
use tracing::debug;

/// Confirm each merged slot with a diff, resetting any that fail (EFFECTFUL)
///
/// Checks run one after another. A slot is kept only when the diff from
/// the target to the source branch is empty; outstanding changes and failed
/// diff requests both reset it to not merged. Resets are idempotent, so
/// validating an already validated status changes nothing.
pub async fn validate_with_diff(
    service: &dyn DevOpsService,
    repository_id: &str,
    claims: HistoryClaims,
) -> BranchMergeStatus {
    let HistoryClaims {
        mut status,
        claimed_refs,
    } = claims;

    for target in TargetBranch::ALL {
        if !status.merged_to.get(target).merged {
            continue;
        }

        let base = claimed_refs
            .get(&target)
            .map_or(target.as_str(), String::as_str);

        let outcome = service
            .diff_between_branches(repository_id, base, &status.branch)
            .await;

        match outcome {
            Ok(summary) if summary.is_fully_merged() => {
                debug!(repository = %status.repository, %target, "merge confirmed by diff");
            }
            Ok(summary) => {
                debug!(
                    repository = %status.repository,
                    %target,
                    changes = summary.total_changes(),
                    "branch diverged from target since merge"
                );
                status.merged_to.get_mut(target).reset();
            }
            Err(e) => {
                debug!(
                    repository = %status.repository,
                    %target,
                    error = %e,
                    "could not confirm merge, treating as not merged"
                );
                status.merged_to.get_mut(target).reset();
            }
        }
    }

    status
}
