//! Shared command context for CLI commands
//!
//! Extracts the setup shared by every command that talks to Azure DevOps.

use fmdt::auth::get_azure_devops_auth;
use fmdt::config::{ConfigOverrides, RuntimeConfig, layer_settings};
use fmdt::error::Result;
use fmdt::platform::{DevOpsService, create_service};
use fmdt::storage::{default_cache_dir, default_config_dir, load_config};
use std::path::PathBuf;

/// Shared context for CLI commands that interact with Azure DevOps
///
/// - Loading the config file
/// - Layering flags and environment variables over it
/// - Resolving the credential
/// - Creating the service
pub struct CommandContext {
    /// Resolved runtime configuration
    pub config: RuntimeConfig,
    /// Azure DevOps service
    pub service: Box<dyn DevOpsService>,
    /// Where config and history live
    pub config_dir: PathBuf,
    /// Where the branch cache lives
    pub cache_dir: PathBuf,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(overrides: &ConfigOverrides) -> Result<Self> {
        let config_dir = default_config_dir()?;
        let cache_dir = default_cache_dir()?;

        let file = load_config(&config_dir)?;
        let settings = layer_settings(overrides, file.as_ref(), |key| std::env::var(key).ok());

        let credential = get_azure_devops_auth().await?;
        let config = settings.into_runtime(credential)?;
        let service = create_service(&config)?;

        Ok(Self {
            config,
            service,
            config_dir,
            cache_dir,
        })
    }
}
