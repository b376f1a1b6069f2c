//! Error types for gh-purge.

use thiserror::Error;

use crate::auth::AuthError;
use crate::workflow::PromptError;

/// Primary error type for every stage of a purge run.
#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Authentication failed: {0}")]
    AuthFlowFailed(#[from] AuthError),

    #[error("No repositories found")]
    NoResourcesFound,

    #[error("GitHub API error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PurgeError {
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Whether this error is a deliberate user abort rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_cancellation() {
            0
        } else {
            1
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PurgeError>;
