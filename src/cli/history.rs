//! History command - recently searched branches

use crate::cli::style::{Stylize, arrow, check};
use anstream::println;
use fmdt::error::Result;
use fmdt::storage::{SearchHistory, default_config_dir, load_history, save_history};

/// Run the history command
pub fn run_history(clear: bool) -> Result<()> {
    let dir = default_config_dir()?;

    if clear {
        save_history(&dir, &SearchHistory::default())?;
        println!("{} History cleared", check());
        return Ok(());
    }

    let history = load_history(&dir);
    if history.branches.is_empty() {
        println!("{}", "No branches searched yet".muted());
        return Ok(());
    }

    for branch in &history.branches {
        println!("  {} {}", arrow(), branch);
    }
    Ok(())
}
