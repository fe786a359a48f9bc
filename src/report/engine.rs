//! The reporting run itself.
//!
//! One linear pass: measure the artifact, resolve the baseline, check the
//! commit's existing status, then post or withhold. Every request is made at
//! most once and nothing is retried; a failure fails the CI step.

use crate::ci::CiContext;
use crate::github::{NewStatus, StatusApi, StatusState};
use crate::report::baseline::resolve_baseline;
use crate::report::ReportError;
use crate::status::{format_description, parse_description};
use crate::types::StatusUrl;
use std::path::Path;

/// What a reporting run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A status was created with the given description.
    Posted { description: String },
    /// Posting was withheld: the commit already carries a status with a
    /// comparison, and this run could not resolve a baseline to match it.
    Withheld { current_size: u64 },
}

/// Measures `artifact` and reports its size as a commit status.
///
/// The artifact path doubles as the status context, so a pipeline weighing
/// several artifacts gets one independent status per path.
pub async fn run<A: StatusApi>(
    api: &A,
    ctx: &CiContext,
    artifact: &Path,
) -> Result<Outcome, ReportError> {
    let size = std::fs::metadata(artifact)
        .map_err(|source| ReportError::Artifact {
            path: artifact.to_path_buf(),
            source,
        })?
        .len();
    let context = artifact.display().to_string();
    tracing::info!(%context, size, "measured artifact");

    report_size(api, ctx, &context, size).await
}

/// Reports a known size under the given status context.
pub async fn report_size<A: StatusApi>(
    api: &A,
    ctx: &CiContext,
    context: &str,
    current_size: u64,
) -> Result<Outcome, ReportError> {
    let baseline = resolve_baseline(api, ctx, context).await?;

    let target = baseline
        .pr_status_url
        .clone()
        .unwrap_or_else(|| StatusUrl::commit_statuses(&ctx.repo, &ctx.commit));

    // A status that already shows a comparison must not be overwritten by
    // one that does not.
    if let Some(existing) = api.status_description(&target, context).await? {
        let (_, existing_previous) = parse_description(&existing)?;
        if existing_previous.is_some() && baseline.previous_size.is_none() {
            tracing::info!(
                %existing,
                current_size,
                "existing status has a comparison and no baseline is available, not posting"
            );
            return Ok(Outcome::Withheld { current_size });
        }
    }

    let description = format_description(current_size, baseline.previous_size);
    api.create_status(
        &target,
        &NewStatus {
            state: StatusState::Success,
            context: context.to_string(),
            description: description.clone(),
        },
    )
    .await?;

    Ok(Outcome::Posted { description })
}
