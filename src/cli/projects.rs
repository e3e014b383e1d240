//! Projects command - list projects in the organization

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use fmdt::config::ConfigOverrides;
use fmdt::error::Result;

/// Run the projects command
pub async fn run_projects(overrides: &ConfigOverrides) -> Result<()> {
    let ctx = CommandContext::new(overrides).await?;
    let mut projects = ctx.service.list_projects().await?;
    projects.sort_by_key(|p| p.name.to_lowercase());

    println!(
        "{} {}",
        "Projects in".emphasis(),
        ctx.config.organization.accent()
    );
    for project in &projects {
        let marker = if project.name == ctx.config.project {
            " (current)".success()
        } else {
            String::new()
        };
        match project.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => println!(
                "  {} {}{marker} {}",
                arrow(),
                project.name,
                description.muted()
            ),
            None => println!("  {} {}{marker}", arrow(), project.name),
        }
    }
    Ok(())
}
