//! A repository-scoped GitHub client.

use crate::github::error::ApiError;
use crate::types::RepoId;
use octocrab::Octocrab;
use std::fmt;

/// An authenticated octocrab instance bound to a single repository.
pub struct GithubClient {
    client: Octocrab,
    repo: RepoId,
}

impl GithubClient {
    /// Builds a client from a personal access token.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(GithubClient { client, repo })
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub(crate) fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Converts an absolute API URL from a GitHub payload into the relative
    /// route octocrab requests take.
    ///
    /// Hypermedia fields (`statuses_url` and friends) are absolute; octocrab
    /// prepends its own base URL, so only the path may be passed through.
    pub(crate) fn route_of(url: &str) -> Result<String, ApiError> {
        let parsed = url::Url::parse(url).map_err(|source| ApiError::InvalidStatusUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(parsed.path().to_string())
    }
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
