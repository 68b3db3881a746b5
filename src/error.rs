//! LinkedIn-specific error types.

use thiserror::Error;

/// LinkedIn-specific errors.
#[derive(Error, Debug)]
pub enum LinkedInError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// LinkedIn API returned an error
    #[error("LinkedIn API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Post properties cannot be syndicated
    #[error("invalid post properties: {0}")]
    InvalidInput(String),

    /// No access token configured
    #[error("no LinkedIn access token configured")]
    NotConfigured,
}

impl LinkedInError {
    /// The HTTP status a caller should surface for this error, if one
    /// applies. Missing credentials map to 401, matching how the remote
    /// platform rejects an expired token.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::NotConfigured => Some(401),
            _ => None,
        }
    }

    /// Check if this error is an authentication/authorization failure.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Result type for LinkedIn operations.
pub type LinkedInResult<T> = Result<T, LinkedInError>;
