//! Azure DevOps REST implementation

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::platform::DevOpsService;
use crate::types::{
    ChangeSummary, HEADS_PREFIX, Project, PullRequestRecord, Repository, short_ref_name,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Public Azure DevOps endpoint
pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com/";

/// Pull requests requested per page
pub const PAGE_SIZE: usize = 101;

/// REST API version sent with every request
const API_VERSION: &str = "7.1";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `{ "value": [...], "count": n }` envelope used by list endpoints
#[derive(Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiProject {
    id: String,
    name: String,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRepository {
    id: String,
    name: String,
    #[serde(default)]
    is_disabled: bool,
    project: Option<ApiProjectRef>,
}

#[derive(Deserialize)]
struct ApiProjectRef {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPullRequest {
    pull_request_id: u64,
    source_ref_name: String,
    target_ref_name: String,
    /// Kept as a string: abandoned/legacy PRs carry dates chrono rejects
    closed_date: Option<String>,
    created_by: ApiIdentity,
    last_merge_commit: Option<ApiCommitRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiIdentity {
    display_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCommitRef {
    commit_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDiff {
    #[serde(default)]
    change_counts: Option<BTreeMap<String, u64>>,
}

#[derive(Deserialize)]
struct ApiRef {
    name: String,
}

impl From<ApiProject> for Project {
    fn from(p: ApiProject) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
        }
    }
}

impl From<ApiPullRequest> for PullRequestRecord {
    fn from(pr: ApiPullRequest) -> Self {
        let closed_date = pr
            .closed_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc));

        Self {
            id: pr.pull_request_id,
            source_ref: pr.source_ref_name,
            target_ref: pr.target_ref_name,
            closed_date,
            author: pr.created_by.display_name,
            merge_commit_id: pr.last_merge_commit.map(|c| c.commit_id),
        }
    }
}

/// Map a non-success response to a typed error
fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();

    // An invalid PAT gets a 203 with the HTML sign-in page instead of a 401
    if status == StatusCode::NON_AUTHORITATIVE_INFORMATION {
        return Err(Error::Unauthorized {
            status: status.as_u16(),
        });
    }

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized {
            status: status.as_u16(),
        }),
        StatusCode::NOT_FOUND => Err(Error::NotFound),
        _ => Err(Error::Http {
            context: context.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }),
    }
}

/// Azure DevOps service using reqwest
pub struct AzureDevOpsService {
    client: Client,
    auth_header: String,
    base_url: Url,
    organization: String,
    project: String,
}

impl AzureDevOpsService {
    /// Create a service for `dev.azure.com`
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a service against another host (Azure DevOps Server, tests)
    pub fn with_base_url(config: &RuntimeConfig, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid base URL '{base_url}'")));
        }

        let client = Client::builder()
            .user_agent(concat!("fmdt/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth_header: config.credential.authorization_header(),
            base_url,
            organization: config.organization.clone(),
            project: config.project.clone(),
        })
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL under `<org>/<project>/_apis/git/repositories`
    fn repositories_url(&self, rest: &[&str]) -> Url {
        let mut segments = vec![
            self.organization.as_str(),
            self.project.as_str(),
            "_apis",
            "git",
            "repositories",
        ];
        segments.extend_from_slice(rest);
        self.api_url(&segments)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .query(&[("api-version", API_VERSION)])
            .query(query)
            .send()
            .await?;

        Ok(check_status(response, context)?.json().await?)
    }
}

#[async_trait]
impl DevOpsService for AzureDevOpsService {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        debug!(organization = %self.organization, "listing projects");
        let url = self.api_url(&[self.organization.as_str(), "_apis", "projects"]);

        let response: ListResponse<ApiProject> =
            self.get_json(url, &[], "fetch projects").await?;

        debug!(count = response.value.len(), "listed projects");
        Ok(response.value.into_iter().map(Into::into).collect())
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        debug!(project = %self.project, "listing repositories");
        let url = self.repositories_url(&[]);

        let response: ListResponse<ApiRepository> =
            self.get_json(url, &[], "fetch repositories").await?;

        let repositories: Vec<Repository> = response
            .value
            .into_iter()
            .map(|r| Repository {
                id: r.id,
                name: r.name,
                is_disabled: r.is_disabled,
                project: r.project.map_or_else(|| self.project.clone(), |p| p.name),
            })
            .collect();

        debug!(count = repositories.len(), "listed repositories");
        Ok(repositories)
    }

    async fn list_completed_pull_requests(
        &self,
        repository_id: &str,
        source_branch: &str,
    ) -> Result<Vec<PullRequestRecord>> {
        let url = self.repositories_url(&[repository_id, "pullrequests"]);
        let source_ref = format!("{HEADS_PREFIX}{source_branch}");
        let top = PAGE_SIZE.to_string();

        let mut records = Vec::new();
        let mut skip = 0usize;

        // Keep going only while pages come back exactly full; a short (or
        // oversized) page ends the loop whatever counts the server reports.
        loop {
            let skip_param = skip.to_string();
            let page: ListResponse<ApiPullRequest> = self
                .get_json(
                    url.clone(),
                    &[
                        ("searchCriteria.sourceRefName", source_ref.as_str()),
                        ("searchCriteria.status", "completed"),
                        ("$skip", skip_param.as_str()),
                        ("$top", top.as_str()),
                    ],
                    "fetch pull requests",
                )
                .await?;

            let count = page.value.len();
            debug!(repository_id, source_branch, skip, count, "fetched pull request page");
            records.extend(page.value.into_iter().map(PullRequestRecord::from));

            if count != PAGE_SIZE {
                break;
            }
            skip += PAGE_SIZE;
        }

        Ok(records)
    }

    async fn diff_between_branches(
        &self,
        repository_id: &str,
        base: &str,
        target: &str,
    ) -> Result<ChangeSummary> {
        debug!(repository_id, base, target, "fetching branch diff");
        let url = self.repositories_url(&[repository_id, "diffs", "commits"]);

        let diff: ApiDiff = self
            .get_json(
                url,
                &[
                    ("baseVersion", base),
                    ("baseVersionType", "branch"),
                    ("targetVersion", target),
                    ("targetVersionType", "branch"),
                ],
                "fetch diff",
            )
            .await?;

        Ok(ChangeSummary {
            change_counts: diff.change_counts.unwrap_or_default(),
        })
    }

    async fn list_branch_refs(&self, repository_id: &str) -> Result<Vec<String>> {
        debug!(repository_id, "listing branch refs");
        let url = self.repositories_url(&[repository_id, "refs"]);

        let response: ListResponse<ApiRef> = self
            .get_json(url, &[("filter", "heads/")], "fetch branches")
            .await?;

        Ok(response
            .value
            .into_iter()
            .map(|r| short_ref_name(&r.name).to_string())
            .collect())
    }
}
