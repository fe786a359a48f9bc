//! The reporting pipeline: resolve a baseline size, measure the artifact,
//! and post (or withhold) a commit status.

pub mod baseline;
pub mod engine;

use crate::github::ApiError;
use crate::status::ParseError;
use crate::types::Sha;
use std::path::PathBuf;
use thiserror::Error;

pub use baseline::{Baseline, resolve_baseline};
pub use engine::{Outcome, run};

/// Errors from a reporting run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The artifact file could not be measured.
    #[error("unable to measure artifact {path}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A GitHub request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A previously posted description no longer round-trips.
    #[error(transparent)]
    Description(#[from] ParseError),

    /// The base repository's statuses URL template is missing its `{sha}`
    /// placeholder, so the base commit cannot be substituted in.
    #[error("statuses URL template {url:?} has no {{sha}} placeholder (base commit {sha})")]
    MalformedStatusesUrl { url: String, sha: Sha },
}
