//! Baseline discovery.
//!
//! For a pull request build, the baseline is the size recorded on the PR's
//! *base* commit under the same status context. Push builds have no baseline;
//! their status simply records the current size for later PRs to diff
//! against.

use crate::ci::CiContext;
use crate::github::StatusApi;
use crate::report::ReportError;
use crate::status::parse_description;
use crate::types::StatusUrl;

/// What baseline discovery found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    /// The artifact's size on the base commit, when one was recorded.
    pub previous_size: Option<u64>,
    /// The PR head's statuses collection, when the build is for a PR.
    ///
    /// `None` means the new status must go on the push commit instead.
    pub pr_status_url: Option<StatusUrl>,
}

impl Baseline {
    fn absent() -> Self {
        Baseline {
            previous_size: None,
            pr_status_url: None,
        }
    }
}

/// Resolves the baseline for this build.
///
/// For PR builds this looks up the base commit's status under `context` and
/// parses the recorded size out of its description. A base commit with no
/// such status yields `previous_size: None`; a status whose description no
/// longer parses is an error.
pub async fn resolve_baseline<A: StatusApi>(
    api: &A,
    ctx: &CiContext,
    context: &str,
) -> Result<Baseline, ReportError> {
    let Some(number) = ctx.pull_request else {
        tracing::info!("push build, no baseline to compare against");
        return Ok(Baseline::absent());
    };

    let pull = api.pull_request(number).await?;

    let template = &pull.base.repo.statuses_url;
    if !template.contains("{sha}") {
        return Err(ReportError::MalformedStatusesUrl {
            url: template.clone(),
            sha: pull.base.sha.clone(),
        });
    }
    let base_url = StatusUrl::new(template.replace("{sha}", pull.base.sha.as_str()));

    let previous_size = match api.status_description(&base_url, context).await? {
        Some(description) => {
            let (size, _) = parse_description(&description)?;
            tracing::info!(
                base = %pull.base.sha.short(),
                size,
                "found baseline on base commit"
            );
            Some(size)
        }
        None => {
            tracing::warn!(
                base = %pull.base.sha.short(),
                context,
                "base commit has no status for this context"
            );
            None
        }
    };

    Ok(Baseline {
        previous_size,
        pr_status_url: Some(StatusUrl::new(pull.statuses_url)),
    })
}
