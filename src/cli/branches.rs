//! Branches command - list known branch names across the project

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, spinner_style};
use anstream::println;
use chrono::Utc;
use fmdt::config::ConfigOverrides;
use fmdt::error::Result;
use fmdt::merge::collect_all_branches;
use fmdt::storage::{
    BranchCache, DEFAULT_CACHE_TTL, default_cache_dir, is_cache_stale, load_branch_cache,
    save_branch_cache, suggest_branches, unique_branches,
};
use indicatif::ProgressBar;
use std::time::Duration;

/// Options for the branches command
#[derive(Debug, Clone, Default)]
pub struct BranchesOptions {
    /// Only show branches containing this text
    pub filter: Option<String>,
    /// Refetch even if the cache is fresh
    pub refresh: bool,
    /// Maximum number of names to print
    pub limit: usize,
}

/// Run the branches command
pub async fn run_branches(overrides: &ConfigOverrides, options: BranchesOptions) -> Result<()> {
    let cache_dir = default_cache_dir()?;
    let cached = load_branch_cache(&cache_dir);

    let needs_refresh = options.refresh
        || cached
            .as_ref()
            .is_none_or(|c| is_cache_stale(c, DEFAULT_CACHE_TTL, Utc::now().timestamp_millis()));

    let cache = match cached {
        Some(cache) if !needs_refresh => cache,
        _ => {
            let ctx = CommandContext::new(overrides).await?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(spinner_style());
            spinner.set_message(format!(
                "Fetching branches in {}...",
                ctx.config.project.emphasis()
            ));
            spinner.enable_steady_tick(Duration::from_millis(80));

            let repositories = match collect_all_branches(ctx.service.as_ref()).await {
                Ok(repositories) => repositories,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            let cache = BranchCache::new(repositories);

            spinner.finish_with_message(format!(
                "{} Fetched branches from {} repositories",
                check(),
                cache.repositories.len().accent()
            ));

            if let Err(e) = save_branch_cache(&ctx.cache_dir, &cache) {
                tracing::warn!(error = %e, "failed to save branch cache");
            }
            cache
        }
    };

    let branches = unique_branches(&cache.repositories);
    let filter = options.filter.as_deref().unwrap_or_default();
    let matches = suggest_branches(&branches, filter, options.limit);

    if matches.is_empty() {
        println!("{}", "No matching branches".muted());
        return Ok(());
    }

    for name in &matches {
        println!("  {} {}", arrow(), name);
    }
    if matches.len() < branches.len() {
        println!(
            "{}",
            format!("{} of {} branches shown", matches.len(), branches.len()).muted()
        );
    }

    Ok(())
}
