//! fmdt - find where a branch has been merged
//!
//! Reports, for every repository in an Azure DevOps project, whether a
//! branch has reached `dev`, `qa`, `staging` and `master`. Merge status is
//! derived from completed pull requests and confirmed with branch diffs.
//!
//! ```rust,no_run
//! use fmdt::auth::AuthConfig;
//! use fmdt::config::RuntimeConfig;
//! use fmdt::merge::batch_branch_merge_status;
//! use fmdt::platform::create_service;
//!
//! # async fn run() -> fmdt::error::Result<()> {
//! let config = RuntimeConfig {
//!     organization: "contoso".to_string(),
//!     project: "web".to_string(),
//!     credential: AuthConfig::pat("my-pat"),
//! };
//! let service = create_service(&config)?;
//! let report = batch_branch_merge_status(service.as_ref(), "feature/login").await?;
//! println!("found in {} repositories", report.operation_summary.successful);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod storage;
pub mod types;
