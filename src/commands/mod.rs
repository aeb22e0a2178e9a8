//! Issue commands.
//!
//! Each command builds an [`IssueRequest`], calls the issues API, and checks
//! the response status the API layer leaves unchecked.

mod output;

use reqwest::StatusCode;
use tracing::{info, instrument};

use crate::api::{ApiClient, Issue, IssueRequest};
use crate::cli::Command;
use crate::editor::ExternalEditor;
use crate::error::{AppError, Result};

pub use output::format_issue;

/// Everything a command needs, built once per invocation.
#[derive(Debug)]
pub struct Context {
    pub client: ApiClient,
    pub owner: String,
    pub repo: String,
    pub editor: ExternalEditor,
}

/// Run a command and return the resulting issue.
#[instrument(skip(ctx), fields(owner = %ctx.owner, repo = %ctx.repo))]
pub async fn run(ctx: &Context, command: Command) -> Result<Issue> {
    let issues = ctx.client.issues();

    let (issue, response, expected) = match command {
        Command::Create {
            title,
            body,
            labels,
            assignees,
        } => {
            let body = match body {
                Some(body) => body,
                None => capture_body(&ctx.editor, "create")?,
            };
            let request = IssueRequest {
                labels: non_empty(labels),
                assignees: non_empty(assignees),
                ..IssueRequest::new(title, body)
            };
            let (issue, response) = issues.create(&ctx.owner, &ctx.repo, &request).await?;
            (issue, response, StatusCode::CREATED)
        }
        Command::Get { number } => {
            let (issue, response) = issues.get(&ctx.owner, &ctx.repo, number).await?;
            (issue, response, StatusCode::OK)
        }
        Command::Update {
            number,
            title,
            body,
            no_edit,
        } => {
            let body = match (body, no_edit) {
                (Some(body), _) => Some(body),
                (None, true) => None,
                (None, false) => Some(capture_body(&ctx.editor, &format!("update-{}", number))?),
            };
            let request = IssueRequest {
                title,
                body,
                ..Default::default()
            };
            if request.is_empty() {
                return Err(AppError::usage(
                    "Nothing to update: pass --title, --body, or drop --no-edit",
                ));
            }
            let (issue, response) = issues.update(&ctx.owner, &ctx.repo, number, &request).await?;
            (issue, response, StatusCode::OK)
        }
        Command::Reopen { number } => {
            let request = IssueRequest::with_state("open");
            let (issue, response) = issues.update(&ctx.owner, &ctx.repo, number, &request).await?;
            (issue, response, StatusCode::OK)
        }
        Command::Close { number } => {
            let request = IssueRequest::with_state("closed");
            let (issue, response) = issues.update(&ctx.owner, &ctx.repo, number, &request).await?;
            (issue, response, StatusCode::OK)
        }
    };

    response.expect_status(expected)?;
    info!(number = ?issue.number, "Command succeeded");
    Ok(issue)
}

/// Open the editor on an empty file and return what was written.
fn capture_body(editor: &ExternalEditor, label: &str) -> Result<String> {
    let content = editor.open(label, "")?;
    Ok(content.trim_end().to_string())
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
