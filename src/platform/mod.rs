//! Azure DevOps platform service
//!
//! Typed, read-only access to the REST endpoints merge resolution needs.
//! Pagination and the authorization header stay inside the implementation.

mod azure;

pub use azure::{AzureDevOpsService, DEFAULT_BASE_URL, PAGE_SIZE};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::types::{ChangeSummary, Project, PullRequestRecord, Repository};
use async_trait::async_trait;

/// Platform service trait for the read operations behind merge resolution
///
/// The merge engine only talks to this trait, so tests can substitute an
/// in-memory implementation.
#[async_trait]
pub trait DevOpsService: Send + Sync {
    /// List projects in the organization
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// List repositories in the configured project.
    ///
    /// Disabled repositories are returned too; filtering them is the
    /// caller's business.
    async fn list_repositories(&self) -> Result<Vec<Repository>>;

    /// List every completed PR whose source ref is `refs/heads/<source_branch>`
    async fn list_completed_pull_requests(
        &self,
        repository_id: &str,
        source_branch: &str,
    ) -> Result<Vec<PullRequestRecord>>;

    /// Change counts of `target` relative to `base`, both branch names.
    ///
    /// An empty summary means `target` has nothing `base` lacks. A failed
    /// request is an error, never an empty summary.
    async fn diff_between_branches(
        &self,
        repository_id: &str,
        base: &str,
        target: &str,
    ) -> Result<ChangeSummary>;

    /// List branch names (without `refs/heads/`) of a repository
    async fn list_branch_refs(&self, repository_id: &str) -> Result<Vec<String>>;
}

/// Create the Azure DevOps service for a runtime config
pub fn create_service(config: &RuntimeConfig) -> Result<Box<dyn DevOpsService>> {
    Ok(Box::new(AzureDevOpsService::new(config)?))
}
