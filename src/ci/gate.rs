//! The Buildkite environment gate.
//!
//! Whether the tool should run at all, and against which commit, is decided
//! entirely by environment variables. The checks are ordered so that a
//! missing token fails loudly even outside CI, while a developer running the
//! binary locally (no `BUILDKITE`) gets a clean no-op.

use crate::ci::slug::{SlugError, resolve_slug};
use crate::types::{PrNumber, RepoId, Sha};
use thiserror::Error;

/// Errors from reading the CI environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// `GITHUB_TOKEN` is unset or empty.
    #[error("GITHUB_TOKEN is not set; cannot post commit statuses")]
    MissingToken,

    /// Running under Buildkite but `BUILDKITE_COMMIT` is unset or empty.
    #[error("BUILDKITE_COMMIT is not set; cannot identify the commit to report on")]
    MissingCommit,

    /// Running under Buildkite but `BUILDKITE_REPO` is unset or empty.
    #[error("BUILDKITE_REPO is not set; cannot identify the repository")]
    MissingRepo,

    /// `BUILDKITE_PULL_REQUEST` is set but is neither `"false"` nor a number.
    #[error("BUILDKITE_PULL_REQUEST has unexpected value {value:?}")]
    InvalidPullRequest { value: String },

    /// `BUILDKITE_REPO` is set but its slug cannot be resolved.
    #[error(transparent)]
    Slug(#[from] SlugError),
}

/// Everything the reporter needs from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiContext {
    pub token: String,
    pub commit: Sha,
    pub repo: RepoId,
    /// `Some` when the build is for a pull request, `None` for branch pushes.
    pub pull_request: Option<PrNumber>,
    pub branch: Option<String>,
}

/// The outcome of inspecting the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Running under Buildkite with everything needed to report.
    Ready(CiContext),
    /// Not a Buildkite build; there is nothing to do.
    NotApplicable,
}

impl Gate {
    /// Reads the gate from the process environment.
    pub fn from_env() -> Result<Gate, EnvError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the gate through an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent throughout; CI systems routinely
    /// export variables set to the empty string.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Gate, EnvError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let token = get("GITHUB_TOKEN").ok_or(EnvError::MissingToken)?;

        if get("BUILDKITE").is_none() {
            return Ok(Gate::NotApplicable);
        }

        let commit = get("BUILDKITE_COMMIT")
            .map(Sha::new)
            .ok_or(EnvError::MissingCommit)?;

        let repo_url = get("BUILDKITE_REPO").ok_or(EnvError::MissingRepo)?;
        let repo = resolve_slug(&repo_url)?;

        let pull_request = match get("BUILDKITE_PULL_REQUEST") {
            None => None,
            Some(value) if value == "false" => None,
            Some(value) => match value.parse::<u64>() {
                Ok(n) => Some(PrNumber(n)),
                Err(_) => return Err(EnvError::InvalidPullRequest { value }),
            },
        };

        let branch = get("BUILDKITE_BRANCH");

        Ok(Gate::Ready(CiContext {
            token,
            commit,
            repo,
            pull_request,
            branch,
        }))
    }
}
