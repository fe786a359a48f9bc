//! Shared test doubles.
//!
//! [`FakeApi`] is an in-memory [`StatusApi`] holding a canned pull request
//! (head `headsha`, base `basesha` in `o/r`) and a map of pre-existing
//! statuses. It records every call so tests can assert on what was, and was
//! not, requested.

use crate::ci::CiContext;
use crate::github::{ApiError, BaseRef, BaseRepo, NewStatus, PullInfo, StatusApi};
use crate::types::{PrNumber, RepoId, Sha, StatusUrl};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn push_context() -> CiContext {
    CiContext {
        token: "token".to_string(),
        commit: Sha::new("pushsha"),
        repo: RepoId::new("o", "r"),
        pull_request: None,
        branch: Some("main".to_string()),
    }
}

pub fn pr_context(number: u64) -> CiContext {
    CiContext {
        pull_request: Some(PrNumber(number)),
        branch: Some("feature".to_string()),
        ..push_context()
    }
}

const DEFAULT_TEMPLATE: &str = "https://api.github.com/repos/o/r/statuses/{sha}";
const HEAD_STATUSES_URL: &str = "https://api.github.com/repos/o/r/statuses/headsha";

#[derive(Default)]
pub struct FakeApi {
    statuses: Mutex<HashMap<(String, String), String>>,
    template: Option<String>,
    fail_code: Option<u16>,
    calls: Mutex<Vec<String>>,
    posted: Mutex<Vec<(String, NewStatus)>>,
}

impl FakeApi {
    /// Seeds a status description at `(url, context)`.
    pub fn with_status(self, url: &str, context: &str, description: &str) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert((url.to_string(), context.to_string()), description.to_string());
        self
    }

    /// Overrides the base repository's statuses URL template.
    pub fn with_statuses_template(mut self, template: &str) -> Self {
        self.template = Some(template.to_string());
        self
    }

    /// Makes every call fail as if GitHub answered with `code`.
    pub fn with_failure(mut self, code: u16) -> Self {
        self.fail_code = Some(code);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<(String, NewStatus)> {
        self.posted.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.clone());
        match self.fail_code {
            Some(code) => Err(ApiError::Status {
                url: call,
                code,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl StatusApi for FakeApi {
    async fn pull_request(&self, number: PrNumber) -> Result<PullInfo, ApiError> {
        self.record(format!("pull_request {number}"))?;
        Ok(PullInfo {
            statuses_url: HEAD_STATUSES_URL.to_string(),
            base: BaseRef {
                sha: Sha::new("basesha"),
                repo: BaseRepo {
                    statuses_url: self
                        .template
                        .clone()
                        .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
                },
            },
        })
    }

    async fn status_description(
        &self,
        url: &StatusUrl,
        context: &str,
    ) -> Result<Option<String>, ApiError> {
        self.record(format!("status_description {url}"))?;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(&(url.as_str().to_string(), context.to_string()))
            .cloned())
    }

    async fn create_status(&self, url: &StatusUrl, status: &NewStatus) -> Result<(), ApiError> {
        self.record(format!("create_status {url}"))?;
        self.posted
            .lock()
            .unwrap()
            .push((url.as_str().to_string(), status.clone()));
        Ok(())
    }
}
