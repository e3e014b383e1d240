//! Mock Azure DevOps service for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use fmdt::error::{Error, Result};
use fmdt::platform::DevOpsService;
use fmdt::types::{ChangeSummary, Project, PullRequestRecord, Repository};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Call record for `diff_between_branches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCall {
    pub repository_id: String,
    pub base: String,
    pub target: String,
}

/// Simple mock service for testing
///
/// Features:
/// - Configurable responses per repository
/// - Call tracking for verification
/// - Error injection per repository / per diff
/// - Optional barrier to prove PR lookups run concurrently
///
/// Diffs default to an empty summary (fully merged) unless set.
#[derive(Default)]
pub struct MockDevOpsService {
    projects: Mutex<Vec<Project>>,
    repositories: Mutex<Vec<Repository>>,
    pull_requests: Mutex<HashMap<String, Vec<PullRequestRecord>>>,
    diffs: Mutex<HashMap<(String, String), ChangeSummary>>,
    branch_refs: Mutex<HashMap<String, Vec<String>>>,
    pr_barrier: Mutex<Option<Arc<Barrier>>>,
    // Call tracking
    list_repositories_calls: Mutex<usize>,
    list_pr_calls: Mutex<Vec<(String, String)>>,
    diff_calls: Mutex<Vec<DiffCall>>,
    // Error injection
    error_on_list_repositories: Mutex<Option<String>>,
    failing_pr_repos: Mutex<HashSet<String>>,
    failing_diffs: Mutex<HashSet<(String, String)>>,
    failing_ref_repos: Mutex<HashSet<String>>,
}

impl MockDevOpsService {
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    pub fn set_projects(&self, projects: Vec<Project>) {
        *self.projects.lock().unwrap() = projects;
    }

    pub fn set_repositories(&self, repositories: Vec<Repository>) {
        *self.repositories.lock().unwrap() = repositories;
    }

    /// Set completed PRs returned for a repository id
    pub fn set_pull_requests(&self, repository_id: &str, records: Vec<PullRequestRecord>) {
        self.pull_requests
            .lock()
            .unwrap()
            .insert(repository_id.to_string(), records);
    }

    /// Set the diff summary for `(repository_id, base)`
    pub fn set_diff(&self, repository_id: &str, base: &str, summary: ChangeSummary) {
        self.diffs
            .lock()
            .unwrap()
            .insert((repository_id.to_string(), base.to_string()), summary);
    }

    pub fn set_branch_refs(&self, repository_id: &str, branches: &[&str]) {
        self.branch_refs.lock().unwrap().insert(
            repository_id.to_string(),
            branches.iter().map(ToString::to_string).collect(),
        );
    }

    /// Make every PR lookup wait until `parties` lookups are in flight
    pub fn require_concurrent_pr_lookups(&self, parties: usize) {
        *self.pr_barrier.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
    }

    // === Error injection ===

    pub fn fail_list_repositories(&self, msg: &str) {
        *self.error_on_list_repositories.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_pull_requests(&self, repository_id: &str) {
        self.failing_pr_repos
            .lock()
            .unwrap()
            .insert(repository_id.to_string());
    }

    pub fn fail_diff(&self, repository_id: &str, base: &str) {
        self.failing_diffs
            .lock()
            .unwrap()
            .insert((repository_id.to_string(), base.to_string()));
    }

    pub fn fail_branch_refs(&self, repository_id: &str) {
        self.failing_ref_repos
            .lock()
            .unwrap()
            .insert(repository_id.to_string());
    }

    // === Call inspection ===

    pub fn list_repositories_call_count(&self) -> usize {
        *self.list_repositories_calls.lock().unwrap()
    }

    pub fn list_pr_calls(&self) -> Vec<(String, String)> {
        self.list_pr_calls.lock().unwrap().clone()
    }

    pub fn diff_calls(&self) -> Vec<DiffCall> {
        self.diff_calls.lock().unwrap().clone()
    }
}

fn transient_error() -> Error {
    Error::Http {
        context: "fetch pull requests".to_string(),
        status: 503,
        status_text: "Service Unavailable".to_string(),
    }
}

#[async_trait]
impl DevOpsService for MockDevOpsService {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        *self.list_repositories_calls.lock().unwrap() += 1;
        if let Some(msg) = self.error_on_list_repositories.lock().unwrap().clone() {
            return Err(Error::Internal(msg));
        }
        Ok(self.repositories.lock().unwrap().clone())
    }

    async fn list_completed_pull_requests(
        &self,
        repository_id: &str,
        source_branch: &str,
    ) -> Result<Vec<PullRequestRecord>> {
        self.list_pr_calls
            .lock()
            .unwrap()
            .push((repository_id.to_string(), source_branch.to_string()));

        let barrier = self.pr_barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }

        if self.failing_pr_repos.lock().unwrap().contains(repository_id) {
            return Err(transient_error());
        }

        Ok(self
            .pull_requests
            .lock()
            .unwrap()
            .get(repository_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn diff_between_branches(
        &self,
        repository_id: &str,
        base: &str,
        target: &str,
    ) -> Result<ChangeSummary> {
        self.diff_calls.lock().unwrap().push(DiffCall {
            repository_id: repository_id.to_string(),
            base: base.to_string(),
            target: target.to_string(),
        });

        let key = (repository_id.to_string(), base.to_string());
        if self.failing_diffs.lock().unwrap().contains(&key) {
            return Err(Error::Http {
                context: "fetch diff".to_string(),
                status: 500,
                status_text: "Internal Server Error".to_string(),
            });
        }

        Ok(self
            .diffs
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_branch_refs(&self, repository_id: &str) -> Result<Vec<String>> {
        if self.failing_ref_repos.lock().unwrap().contains(repository_id) {
            return Err(Error::NotFound);
        }
        Ok(self
            .branch_refs
            .lock()
            .unwrap()
            .get(repository_id)
            .cloned()
            .unwrap_or_default())
    }
}
