//! GitHub REST API access: a repository-scoped client, the small API surface
//! the reporter uses, and error classification.

pub mod api;
pub mod client;
pub mod error;

pub use api::{BaseRef, BaseRepo, NewStatus, PullInfo, StatusApi, StatusEntry, StatusState};
pub use client::GithubClient;
pub use error::ApiError;
