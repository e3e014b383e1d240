//! Shared test fixtures

#![allow(dead_code)]

mod mock_service;

pub use mock_service::{DiffCall, MockDevOpsService};

use chrono::{DateTime, TimeZone, Utc};
use fmdt::types::{ChangeSummary, PullRequestRecord, Repository};

/// Enabled repository with id `<name>-id`
pub fn make_repo(name: &str) -> Repository {
    Repository {
        id: format!("{name}-id"),
        name: name.to_string(),
        is_disabled: false,
        project: "web".to_string(),
    }
}

/// Disabled repository with id `<name>-id`
pub fn make_disabled_repo(name: &str) -> Repository {
    Repository {
        is_disabled: true,
        ..make_repo(name)
    }
}

/// Midnight UTC on the given day
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Completed PR from `feature/login` into `target`
pub fn make_pr(target: &str, closed: DateTime<Utc>, author: &str) -> PullRequestRecord {
    PullRequestRecord {
        id: u64::try_from(closed.timestamp()).unwrap_or_default(),
        source_ref: "refs/heads/feature/login".to_string(),
        target_ref: format!("refs/heads/{target}"),
        closed_date: Some(closed),
        author: author.to_string(),
        merge_commit_id: Some(format!("merge-{target}")),
    }
}

/// Diff summary with `count` edited files
pub fn changed(count: u64) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    summary.change_counts.insert("Edit".to_string(), count);
    summary
}
