//! gh-issues - create, view and update GitHub issues from the terminal.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use gh_issues::api::client::DEFAULT_BASE_URL;
use gh_issues::api::ApiClient;
use gh_issues::cli::Cli;
use gh_issues::commands::{self, Context};
use gh_issues::config;
use gh_issues::editor::ExternalEditor;
use gh_issues::error::{AppError, Result};
use gh_issues::logging;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("hint: {}", action);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = config::load(cli.config.as_deref(), &cli.overrides.into())?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .user_agent(concat!("gh-issues/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Api(e.into()))?;

    let base_url = config
        .github
        .base_url
        .as_deref()
        .unwrap_or(DEFAULT_BASE_URL);
    let client = ApiClient::with_base_url(http, &config.github.token, base_url)?;

    let ctx = Context {
        client,
        owner: config.github.owner,
        repo: config.github.repo,
        editor: ExternalEditor::new(config.editor.as_deref()),
    };

    let issue = commands::run(&ctx, cli.command).await?;
    Ok(commands::format_issue(&issue))
}
