//! Runtime configuration
//!
//! Organization and project are layered from CLI flags, environment
//! variables and the config file, in that order. The credential is never
//! persisted; it comes from [`crate::auth`].

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::storage::FileConfig;

/// Environment variable overriding the organization
pub const ORG_ENV_VAR: &str = "AZURE_DEVOPS_ORG";

/// Environment variable overriding the project
pub const PROJECT_ENV_VAR: &str = "AZURE_DEVOPS_PROJECT";

/// Everything the Azure DevOps client needs, passed around explicitly
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Organization name (`dev.azure.com/<organization>`)
    pub organization: String,
    /// Project name
    pub project: String,
    /// Credential used for every request
    pub credential: AuthConfig,
}

/// Organization and project as resolved from all layers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Organization, if any layer provided one
    pub organization: Option<String>,
    /// Project, if any layer provided one
    pub project: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--org`
    pub organization: Option<String>,
    /// `--project`
    pub project: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Layer overrides, environment and file values.
///
/// `env` is a lookup so callers can substitute the process environment in
/// tests.
pub fn layer_settings(
    overrides: &ConfigOverrides,
    file: Option<&FileConfig>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let organization = non_empty(overrides.organization.clone())
        .or_else(|| non_empty(env(ORG_ENV_VAR)))
        .or_else(|| non_empty(file.map(|f| f.organization.clone())));
    let project = non_empty(overrides.project.clone())
        .or_else(|| non_empty(env(PROJECT_ENV_VAR)))
        .or_else(|| non_empty(file.map(|f| f.project.clone())));

    Settings {
        organization,
        project,
    }
}

impl Settings {
    /// Combine with a credential into a [`RuntimeConfig`].
    ///
    /// Fails naming the first missing field.
    pub fn into_runtime(self, credential: AuthConfig) -> Result<RuntimeConfig> {
        let organization = self.organization.ok_or_else(|| {
            Error::Config(format!(
                "no organization configured. Run 'fmdt configure', pass --org, or set {ORG_ENV_VAR}."
            ))
        })?;
        let project = self.project.ok_or_else(|| {
            Error::Config(format!(
                "no project configured. Run 'fmdt configure', pass --project, or set {PROJECT_ENV_VAR}."
            ))
        })?;

        Ok(RuntimeConfig {
            organization,
            project,
            credential,
        })
    }
}
