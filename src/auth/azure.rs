//! Azure DevOps credential discovery

use super::{AuthConfig, AuthSource, PAT_ENV_VAR};
use crate::error::{Error, Result};
use crate::platform::DevOpsService;
use tokio::process::Command;
use tracing::debug;

/// Azure AD resource id of Azure DevOps, used when asking `az` for a token
const AZURE_DEVOPS_RESOURCE: &str = "499b84ac-1321-427f-aa17-267ca6975798";

/// Resolve a credential.
///
/// Priority: `AZURE_DEVOPS_PAT`, then `az account get-access-token`.
pub async fn get_azure_devops_auth() -> Result<AuthConfig> {
    if let Ok(token) = std::env::var(PAT_ENV_VAR) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            debug!("using PAT from {PAT_ENV_VAR}");
            return Ok(AuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    if let Some(token) = get_az_cli_token().await {
        debug!("using access token from az CLI");
        return Ok(AuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(format!(
        "No Azure DevOps credential found. Set {PAT_ENV_VAR} to a Personal Access Token \
         with Code (Read) and Project and Team (Read) scopes, or run `az login`."
    )))
}

/// Ask the Azure CLI for an access token; `None` if `az` is missing or not
/// logged in
async fn get_az_cli_token() -> Option<String> {
    let output = Command::new("az")
        .args([
            "account",
            "get-access-token",
            "--resource",
            AZURE_DEVOPS_RESOURCE,
            "--query",
            "accessToken",
            "--output",
            "tsv",
        ])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        debug!(status = ?output.status, "az get-access-token failed");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Verify a credential by listing projects in the organization.
///
/// Returns the number of visible projects.
pub async fn test_azure_devops_auth(service: &dyn DevOpsService) -> Result<usize> {
    let projects = service.list_projects().await?;
    debug!(count = projects.len(), "credential accepted");
    Ok(projects.len())
}
