//! Configure command - save organization and project

use crate::cli::style::{Stylize, check};
use anstream::println;
use dialoguer::{Input, Select};
use fmdt::auth::get_azure_devops_auth;
use fmdt::config::{ConfigOverrides, RuntimeConfig};
use fmdt::error::{Error, Result};
use fmdt::platform::{AzureDevOpsService, DevOpsService};
use fmdt::storage::{FileConfig, config_path, default_config_dir, load_config, save_config};

/// Run the configure command
///
/// Prompts for whatever `--org`/`--project` did not provide. The
/// organization's projects are always listed, which checks the credential
/// and the project name before anything is saved.
pub async fn run_configure(overrides: &ConfigOverrides) -> Result<()> {
    let dir = default_config_dir()?;
    let existing = load_config(&dir).ok().flatten().unwrap_or_default();

    let organization = match overrides.organization.clone() {
        Some(org) => org,
        None => Input::<String>::new()
            .with_prompt("Azure DevOps organization")
            .with_initial_text(existing.organization.clone())
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read organization: {e}")))?,
    };
    let organization = organization.trim().to_string();

    let credential = get_azure_devops_auth().await?;
    let service = AzureDevOpsService::new(&RuntimeConfig {
        organization: organization.clone(),
        project: String::new(),
        credential,
    })?;

    let mut names: Vec<String> = service
        .list_projects()
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();
    if names.is_empty() {
        return Err(Error::Config(format!(
            "no projects visible in organization '{organization}'"
        )));
    }
    names.sort_by_key(|n| n.to_lowercase());

    let project = if let Some(requested) = overrides.project.as_deref() {
        match_project(&names, requested, &organization)?
    } else {
        let default = names
            .iter()
            .position(|n| *n == existing.project)
            .unwrap_or(0);
        let index = Select::new()
            .with_prompt("Project")
            .items(&names)
            .default(default)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read project: {e}")))?;
        names.swap_remove(index)
    };

    let config = FileConfig {
        organization,
        project,
        ..FileConfig::default()
    };
    save_config(&dir, &config)?;

    println!(
        "{} Saved {} / {} to {}",
        check(),
        config.organization.accent(),
        config.project.accent(),
        config_path(&dir).display().muted()
    );
    Ok(())
}

/// Find `requested` among the organization's project names.
///
/// An exact match wins; otherwise a single case-insensitive match is
/// accepted and returned with the server's spelling.
fn match_project(names: &[String], requested: &str, organization: &str) -> Result<String> {
    let requested = requested.trim();
    if let Some(name) = names.iter().find(|n| *n == requested) {
        return Ok(name.clone());
    }

    let mut folded = names.iter().filter(|n| n.eq_ignore_ascii_case(requested));
    match (folded.next(), folded.next()) {
        (Some(name), None) => Ok(name.clone()),
        _ => Err(Error::Config(format!(
            "project '{requested}' not found in organization '{organization}'. \
             Run 'fmdt projects' to list them."
        ))),
    }
}
