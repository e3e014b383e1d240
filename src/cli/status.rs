//! Status command - where has a branch been merged

use crate::cli::context::CommandContext;
use crate::cli::render::print_report;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use fmdt::config::ConfigOverrides;
use fmdt::error::Result;
use fmdt::merge::{batch_branch_merge_status, normalize_branch_name};
use fmdt::storage::{add_to_history, load_history, save_history};
use indicatif::ProgressBar;
use std::time::Duration;

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Print the report as JSON instead of a table
    pub json: bool,
}

/// Run the status command
pub async fn run_status(
    overrides: &ConfigOverrides,
    branch: &str,
    options: StatusOptions,
) -> Result<()> {
    // Reject bad input before touching credentials or the network
    let branch = normalize_branch_name(branch)?;
    let ctx = CommandContext::new(overrides).await?;

    let spinner = ProgressBar::new_spinner();
    if options.json {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Checking {} across {}...",
        branch.accent(),
        ctx.config.project.emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let report = match batch_branch_merge_status(ctx.service.as_ref(), &branch).await {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!(
        "{} Checked {} repositories",
        check(),
        report.operation_summary.total.accent()
    ));

    // History is a convenience; never fail the command over it
    let history = add_to_history(&branch, &load_history(&ctx.config_dir));
    if let Err(e) = save_history(&ctx.config_dir, &history) {
        tracing::warn!(error = %e, "failed to save search history");
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        print_report(&branch, &report);
    }

    Ok(())
}
