use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weigh_in::ci::{EnvError, Gate};
use weigh_in::github::GithubClient;
use weigh_in::report::{self, Outcome, ReportError};

/// Report a build artifact's size as a GitHub commit status.
#[derive(Debug, Parser)]
#[command(name = "weigh-in", version)]
struct Cli {
    /// Path to the artifact to weigh. Also used as the status context.
    artifact: PathBuf,
}

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("unable to build the GitHub client")]
    Client(#[source] octocrab::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weigh_in=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("weigh-in: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, MainError> {
    let ctx = match Gate::from_env()? {
        Gate::Ready(ctx) => ctx,
        Gate::NotApplicable => {
            tracing::info!("not running under Buildkite, nothing to report");
            return Ok(ExitCode::SUCCESS);
        }
    };

    tracing::info!(
        repo = %ctx.repo,
        commit = %ctx.commit.short(),
        pull_request = ?ctx.pull_request,
        branch = ?ctx.branch,
        "reporting artifact size"
    );

    let client = GithubClient::from_token(ctx.token.clone(), ctx.repo.clone())
        .map_err(MainError::Client)?;

    match report::run(&client, &ctx, &cli.artifact).await? {
        Outcome::Posted { description } => {
            tracing::info!(%description, "reported artifact size");
        }
        Outcome::Withheld { current_size } => {
            tracing::info!(current_size, "left the existing status in place");
        }
    }
    Ok(ExitCode::SUCCESS)
}
