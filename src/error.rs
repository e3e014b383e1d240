//! Error types for fmdt

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the Azure DevOps client, the merge engine and the
/// local storage helpers
#[derive(Debug, Error)]
pub enum Error {
    /// Credential rejected (401) or missing scopes (403)
    #[error(
        "Azure DevOps rejected the credential (HTTP {status}). Check that your Personal Access \
         Token or az CLI login is valid and has the required scopes: Code (Read), Project and \
         Team (Read)"
    )]
    Unauthorized {
        /// 401 or 403
        status: u16,
    },

    /// Organization or project does not exist (404)
    #[error(
        "Organization or project not found. Please check the names are correct. \
         They should match the URL: https://dev.azure.com/ORGANIZATION/PROJECT"
    )]
    NotFound,

    /// Any other non-2xx response
    #[error("Failed to {context}: {status} {status_text}")]
    Http {
        /// What the request was trying to do (e.g. "fetch repositories")
        context: String,
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
    },

    /// Network or transport failure before a response was received
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON payload
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable credential
    #[error("authentication error: {0}")]
    Auth(String),

    /// Local history or branch cache could not be read or written
    #[error("storage error: {0}")]
    Storage(String),

    /// Branch name rejected before any request was made
    #[error("invalid branch name: {0}")]
    InvalidBranch(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status carried by this error, if it came from a response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Http { status, .. } => Some(*status),
            Self::NotFound => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message_covers_pat_and_cli_tokens() {
        let message = Error::Unauthorized { status: 401 }.to_string();
        assert!(message.contains("HTTP 401"));
        assert!(message.contains("Personal Access Token"));
        assert!(message.contains("az CLI login"));
        assert!(!message.contains("Invalid PAT"));
    }

    #[test]
    fn test_status_of_response_errors() {
        assert_eq!(Error::Unauthorized { status: 403 }.status(), Some(403));
        assert_eq!(Error::NotFound.status(), Some(404));
        assert_eq!(Error::Config("x".into()).status(), None);
    }
}
