//! Error types for GitHub API interactions.

use thiserror::Error;

/// Errors from talking to the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// GitHub answered with a non-success status code.
    #[error("GitHub returned {code} for {url}: {message}")]
    Status {
        url: String,
        code: u16,
        message: String,
    },

    /// The request never produced a GitHub answer (network, serialization).
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: octocrab::Error,
    },

    /// A statuses URL from a GitHub payload could not be parsed.
    #[error("malformed statuses URL {url:?}")]
    InvalidStatusUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Classifies an octocrab error for the given request URL.
    pub fn from_octocrab(url: impl Into<String>, err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => ApiError::Status {
                url: url.into(),
                code: source.status_code.as_u16(),
                message: source.message,
            },
            other => ApiError::Transport {
                url: url.into(),
                source: other,
            },
        }
    }

    /// The HTTP status code, when GitHub produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            ApiError::Transport { .. } | ApiError::InvalidStatusUrl { .. } => None,
        }
    }
}
