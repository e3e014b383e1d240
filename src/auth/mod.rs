//! Authentication for Azure DevOps
//!
//! Supports a Personal Access Token from the environment and access tokens
//! issued by the Azure CLI (`az`).

mod azure;

pub use azure::{get_azure_devops_auth, test_azure_devops_auth};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Environment variable holding a Personal Access Token
pub const PAT_ENV_VAR: &str = "AZURE_DEVOPS_PAT";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (az)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// A resolved credential
#[derive(Clone)]
pub struct AuthConfig {
    /// Raw token (PAT or bearer access token)
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

impl AuthConfig {
    /// Credential for a Personal Access Token
    pub fn pat(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            source: AuthSource::EnvVar,
        }
    }

    /// Value for the `Authorization` header.
    ///
    /// PATs use Basic auth with an empty user name; CLI tokens are bearer
    /// tokens.
    pub fn authorization_header(&self) -> String {
        match self.source {
            AuthSource::EnvVar => {
                let encoded = STANDARD.encode(format!(":{}", self.token));
                format!("Basic {encoded}")
            }
            AuthSource::Cli => format!("Bearer {}", self.token),
        }
    }
}
