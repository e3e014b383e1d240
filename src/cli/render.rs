//! Table rendering for merge status reports

use crate::cli::style::{CHECK, CROSS, Stylize, check};
use anstream::println;
use fmdt::types::{BatchReport, EnvironmentMergeState, TargetBranch};

/// Widest repository name shown before truncating
const MAX_REPO_WIDTH: usize = 40;

/// Width of one target column (`✓ Jun 1 14:03 Firstname L...`)
const CELL_WIDTH: usize = 28;

/// Shorten `text` to `max` characters, ending in `...` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Plain-text cell for one target, without colors
pub fn format_cell(state: &EnvironmentMergeState) -> String {
    if !state.merged {
        return CROSS.to_string();
    }

    let date = state
        .date
        .map(|d| d.format("%b %-d %H:%M").to_string())
        .unwrap_or_default();
    let by = state.merged_by.as_deref().unwrap_or_default();

    let mut cell = String::from(CHECK);
    for part in [date.as_str(), by] {
        if !part.is_empty() {
            cell.push(' ');
            cell.push_str(part);
        }
    }
    truncate(&cell, CELL_WIDTH)
}

/// One line summarizing the batch
pub fn summary_line(report: &BatchReport) -> String {
    let summary = &report.operation_summary;
    let mut line = format!(
        "Found in {} of {} repositories",
        summary.successful, summary.total
    );
    if summary.failed > 0 {
        line.push_str(&format!(
            ", {} failed: {}",
            summary.failed,
            summary.failed_repos.join(", ")
        ));
    }
    line
}

/// Print the status table and summary
pub fn print_report(branch: &str, report: &BatchReport) {
    println!("{} {}", "Branch:".emphasis(), branch.accent());
    println!();

    if report.statuses.is_empty() {
        println!(
            "{}",
            "Branch has not been merged anywhere in this project.".muted()
        );
    } else {
        let repo_width = report
            .statuses
            .iter()
            .map(|s| s.repository.chars().count())
            .max()
            .unwrap_or(0)
            .clamp("Repository".len(), MAX_REPO_WIDTH);

        let mut header = format!("{:<repo_width$}", "Repository");
        for target in TargetBranch::ALL {
            header.push_str(&format!("  {:<CELL_WIDTH$}", target.as_str()));
        }
        println!("{}", header.trim_end().emphasis());

        for status in &report.statuses {
            let repo = truncate(&status.repository, MAX_REPO_WIDTH);
            let mut line = format!("{repo:<repo_width$}");
            for (_, state) in status.merged_to.iter() {
                let cell = format!("{:<CELL_WIDTH$}", format_cell(state));
                let colored = if state.merged { cell.success() } else { cell.muted() };
                line.push_str("  ");
                line.push_str(&colored);
            }
            println!("{}", line.trim_end());
        }
    }

    println!();
    let summary = summary_line(report);
    if report.operation_summary.failed > 0 {
        println!("{}", summary.warn());
    } else {
        println!("{} {summary}", check());
    }
}
