//! The slice of the GitHub REST API this tool touches.
//!
//! The payload types deserialize only the fields we read; GitHub sends far
//! more. [`StatusApi`] is the seam the reporting logic is written against, so
//! tests can drive it with an in-memory fake instead of a live API.

use crate::github::client::GithubClient;
use crate::github::error::ApiError;
use crate::types::{PrNumber, Sha, StatusUrl};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// The fields of a pull request payload the reporter consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PullInfo {
    /// Statuses collection for the PR's head commit.
    pub statuses_url: String,
    pub base: BaseRef,
}

/// The base side of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRef {
    pub sha: Sha,
    pub repo: BaseRepo,
}

/// The base repository's hypermedia fields.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRepo {
    /// A URL template containing a literal `{sha}` placeholder.
    pub statuses_url: String,
}

/// One entry in a commit's statuses collection.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEntry {
    pub context: String,
    pub description: Option<String>,
}

/// The state of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Error,
    Failure,
    Pending,
    Success,
}

/// A commit status to be created.
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    pub state: StatusState,
    pub context: String,
    pub description: String,
}

/// The GitHub operations the reporter needs.
pub trait StatusApi {
    /// Fetches a pull request in the client's repository.
    fn pull_request(
        &self,
        number: PrNumber,
    ) -> impl Future<Output = Result<PullInfo, ApiError>> + Send;

    /// Fetches the statuses at `url` and returns the description of the
    /// newest status whose context is `context`, if any.
    ///
    /// GitHub returns statuses newest first, so the first match wins. A
    /// status with a missing or empty description counts as absent.
    fn status_description(
        &self,
        url: &StatusUrl,
        context: &str,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;

    /// Creates a commit status on the collection at `url`.
    fn create_status(
        &self,
        url: &StatusUrl,
        status: &NewStatus,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Picks the description of the first status matching `context`.
///
/// Earlier entries win, which on GitHub means the most recent status; a
/// missing or empty description counts as no status at all.
fn first_description(
    statuses: impl IntoIterator<Item = StatusEntry>,
    context: &str,
) -> Option<String> {
    statuses
        .into_iter()
        .find(|status| status.context == context)
        .and_then(|status| status.description)
        .filter(|description| !description.is_empty())
}

impl StatusApi for GithubClient {
    async fn pull_request(&self, number: PrNumber) -> Result<PullInfo, ApiError> {
        let route = format!(
            "/repos/{}/{}/pulls/{}",
            self.repo().owner,
            self.repo().repo,
            number.0
        );
        tracing::debug!(%route, "fetching pull request");
        self.inner()
            .get(&route, None::<&()>)
            .await
            .map_err(|err| ApiError::from_octocrab(route, err))
    }

    async fn status_description(
        &self,
        url: &StatusUrl,
        context: &str,
    ) -> Result<Option<String>, ApiError> {
        let route = GithubClient::route_of(url.as_str())?;
        tracing::debug!(%route, context, "fetching statuses");
        let statuses: Vec<StatusEntry> = self
            .inner()
            .get(&route, None::<&()>)
            .await
            .map_err(|err| ApiError::from_octocrab(route, err))?;

        Ok(first_description(statuses, context))
    }

    async fn create_status(&self, url: &StatusUrl, status: &NewStatus) -> Result<(), ApiError> {
        let route = GithubClient::route_of(url.as_str())?;
        let _: serde_json::Value = self
            .inner()
            .post(&route, Some(status))
            .await
            .map_err(|err| ApiError::from_octocrab(route, err))?;
        tracing::info!(
            context = %status.context,
            description = %status.description,
            "posted commit status"
        );
        Ok(())
    }
}
