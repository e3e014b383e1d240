//! Merge status from PR history - pure functions
//!
//! No I/O happens here. The records are fetched beforehand and the result
//! is later confirmed (or refuted) by diff validation.

use crate::types::{BranchMergeStatus, EnvironmentMergeState, PullRequestRecord, TargetBranch};
use std::collections::BTreeMap;

/// Merge status as claimed by PR history, before diff validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryClaims {
    /// Status with a slot filled for every target that has a completed PR
    pub status: BranchMergeStatus,
    /// Branch name each filled slot was claimed from, as the PR spelled it
    /// (e.g. `main` for the master slot). Diff validation compares against
    /// this name.
    pub claimed_refs: BTreeMap<TargetBranch, String>,
}

/// Derive per-target merge state from completed PRs (PURE)
///
/// PRs are visited most recent first; the first PR matching a target fills
/// that slot and later ones are ignored. PRs targeting anything outside the
/// ladder are skipped. A PR without a completion date sorts as the oldest.
#[must_use]
pub fn derive_status_from_history(
    branch: &str,
    repository: &str,
    records: &[PullRequestRecord],
) -> HistoryClaims {
    let mut status = BranchMergeStatus::unmerged(branch, repository);
    let mut claimed_refs = BTreeMap::new();

    let mut sorted: Vec<&PullRequestRecord> = records.iter().collect();
    // Stable: ties keep API order
    sorted.sort_by(|a, b| b.closed_date.cmp(&a.closed_date));

    for record in sorted {
        let Some(target) = TargetBranch::from_branch_name(&record.target_ref) else {
            continue;
        };
        if claimed_refs.contains_key(&target) {
            continue;
        }

        *status.merged_to.get_mut(target) =
            EnvironmentMergeState::merged(record.closed_date, record.author.clone());
        claimed_refs.insert(target, record.target_branch().to_string());

        if claimed_refs.len() == TargetBranch::ALL.len() {
            break;
        }
    }

    HistoryClaims {
        status,
        claimed_refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(target: &str, day: u32, author: &str) -> PullRequestRecord {
        PullRequestRecord {
            id: u64::from(day),
            source_ref: "refs/heads/feat".to_string(),
            target_ref: format!("refs/heads/{target}"),
            closed_date: Some(Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap()),
            author: author.to_string(),
            merge_commit_id: None,
        }
    }

    #[test]
    fn test_no_records_means_nothing_merged() {
        let claims = derive_status_from_history("feat", "api", &[]);
        assert!(!claims.status.merged_to.any_merged());
        assert!(claims.claimed_refs.is_empty());
    }

    #[test]
    fn test_most_recent_wins_regardless_of_api_order() {
        let records = vec![record("dev", 1, "Alice"), record("dev", 9, "Bob"), record("dev", 5, "Carol")];
        let claims = derive_status_from_history("feat", "api", &records);

        let dev = claims.status.merged_to.get(TargetBranch::Dev);
        assert_eq!(dev.merged_by.as_deref(), Some("Bob"));
        assert_eq!(dev.date, records[1].closed_date);
    }

    #[test]
    fn test_main_fills_master_slot_with_real_name() {
        let claims = derive_status_from_history("feat", "api", &[record("Main", 2, "Dana")]);

        assert!(claims.status.merged_to.master.merged);
        assert_eq!(
            claims.claimed_refs.get(&TargetBranch::Master).map(String::as_str),
            Some("Main")
        );
    }

    #[test]
    fn test_unknown_targets_create_no_slot() {
        let claims = derive_status_from_history(
            "feat",
            "api",
            &[record("release/2.0", 3, "Eve"), record("feature-base", 4, "Eve")],
        );
        assert!(!claims.status.merged_to.any_merged());
    }

    #[test]
    fn test_slots_are_independent() {
        let claims = derive_status_from_history("feat", "api", &[record("qa", 3, "Frank")]);
        assert!(claims.status.merged_to.qa.merged);
        assert!(!claims.status.merged_to.dev.merged);
    }

    #[test]
    fn test_missing_date_sorts_oldest() {
        let mut undated = record("staging", 1, "Old");
        undated.closed_date = None;
        let records = vec![undated, record("staging", 2, "New")];

        let claims = derive_status_from_history("feat", "api", &records);
        assert_eq!(
            claims.status.merged_to.staging.merged_by.as_deref(),
            Some("New")
        );
    }
}
