//! Batch aggregation across every repository in a project

use crate::error::Result;
use crate::merge::{normalize_branch_name, resolve_branch_status};
use crate::platform::DevOpsService;
use crate::types::{
    BatchReport, BranchMergeStatus, OperationSummary, Repository, RepositoryBranches,
};
use chrono::Utc;
use futures::future::join_all;
use tracing::debug;

/// Enabled repositories of the project, in listing order.
///
/// Errors here are fatal for the caller; there is nothing to fan out over.
async fn enabled_repositories(service: &dyn DevOpsService) -> Result<Vec<Repository>> {
    let repositories: Vec<Repository> = service
        .list_repositories()
        .await?
        .into_iter()
        .filter(|r| !r.is_disabled)
        .collect();
    debug!(count = repositories.len(), "enabled repositories");
    Ok(repositories)
}

/// Resolve `branch` in every enabled repository of the project.
///
/// All repositories are queried concurrently and every one gets an
/// outcome; a failing repository is counted and named in the summary
/// instead of failing the batch. Only a failure to list repositories
/// propagates, along with an empty branch name.
pub async fn batch_branch_merge_status(
    service: &dyn DevOpsService,
    branch: &str,
) -> Result<BatchReport> {
    let branch = normalize_branch_name(branch)?;
    let repositories = enabled_repositories(service).await?;

    let outcomes = join_all(
        repositories
            .iter()
            .map(|repo| resolve_branch_status(service, repo, &branch)),
    )
    .await;

    Ok(aggregate_outcomes(&repositories, outcomes))
}

/// Fold per-repository outcomes into a report (PURE)
///
/// `outcomes[i]` belongs to `repositories[i]`. Statuses keep listing order
/// and only those merged into at least one target are kept. A failed
/// repository is reported by name only; its error is logged at debug.
pub fn aggregate_outcomes(
    repositories: &[Repository],
    outcomes: Vec<Result<BranchMergeStatus>>,
) -> BatchReport {
    let mut statuses = Vec::new();
    let mut failed_repos = Vec::new();

    for (repo, outcome) in repositories.iter().zip(outcomes) {
        match outcome {
            Ok(status) if status.merged_to.any_merged() => statuses.push(status),
            Ok(_) => debug!(repository = %repo.name, "branch not merged anywhere"),
            Err(e) => {
                debug!(repository = %repo.name, error = %e, "merge status lookup failed");
                failed_repos.push(repo.name.clone());
            }
        }
    }

    let operation_summary = OperationSummary {
        total: repositories.len(),
        successful: statuses.len(),
        failed: failed_repos.len(),
        failed_repos,
    };

    BatchReport {
        statuses,
        operation_summary,
    }
}

/// Fetch branch names of every enabled repository, concurrently.
///
/// Repositories whose refs cannot be listed are left out.
pub async fn collect_all_branches(service: &dyn DevOpsService) -> Result<Vec<RepositoryBranches>> {
    let repositories = enabled_repositories(service).await?;

    let outcomes = join_all(repositories.iter().map(|repo| async move {
        let branches = service.list_branch_refs(&repo.id).await?;
        Ok::<_, crate::error::Error>(RepositoryBranches {
            repository_id: repo.id.clone(),
            repository_name: repo.name.clone(),
            branches,
            fetched_at: Utc::now().timestamp_millis(),
        })
    }))
    .await;

    Ok(repositories
        .iter()
        .zip(outcomes)
        .filter_map(|(repo, outcome)| match outcome {
            Ok(branches) => Some(branches),
            Err(e) => {
                debug!(repository = %repo.name, error = %e, "failed to list branches");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::EnvironmentMergeState;

    fn repo(name: &str) -> Repository {
        Repository {
            id: format!("{name}-id"),
            name: name.to_string(),
            is_disabled: false,
            project: "proj".to_string(),
        }
    }

    fn merged_to_dev(repository: &str) -> BranchMergeStatus {
        let mut status = BranchMergeStatus::unmerged("feat", repository);
        status.merged_to.dev = EnvironmentMergeState::merged(None, "Alice".to_string());
        status
    }

    #[test]
    fn test_aggregate_partitions_outcomes() {
        let repos = vec![repo("a"), repo("b"), repo("c"), repo("d")];
        let outcomes = vec![
            Ok(merged_to_dev("a")),
            Ok(BranchMergeStatus::unmerged("feat", "b")),
            Err(Error::Internal("boom".to_string())),
            Ok(merged_to_dev("d")),
        ];

        let report = aggregate_outcomes(&repos, outcomes);

        let names: Vec<_> = report.statuses.iter().map(|s| s.repository.as_str()).collect();
        assert_eq!(names, vec!["a", "d"]);
        assert_eq!(report.operation_summary.total, 4);
        assert_eq!(report.operation_summary.successful, 2);
        assert_eq!(report.operation_summary.failed, 1);
        assert_eq!(report.operation_summary.failed_repos, vec!["c"]);
        assert_eq!(report.operation_summary.not_found(), 1);
    }

    #[test]
    fn test_aggregate_empty_project() {
        let report = aggregate_outcomes(&[], vec![]);
        assert!(report.statuses.is_empty());
        assert_eq!(report.operation_summary, OperationSummary::default());
    }
}
