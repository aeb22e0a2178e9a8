//! The GitHub issues API.
//!
//! Each method maps to one endpoint. None of them checks the response status;
//! the [`ApiResponse`] is returned so the caller can.

use std::borrow::Cow;

use reqwest::Method;
use tracing::{debug, instrument};

use super::client::{ApiClient, ApiResponse};
use super::error::{ApiError, Result};
use super::types::{Issue, IssueRequest};

/// Typed access to `/repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Copy)]
pub struct IssuesService<'a> {
    client: &'a ApiClient,
}

impl<'a> IssuesService<'a> {
    /// Create the service over a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a new issue on the specified repository.
    ///
    /// `POST /repos/{owner}/{repo}/issues`, expect 201 on success. Never
    /// retried: a repeated create makes a duplicate issue.
    #[instrument(skip(self, issue))]
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        issue: &IssueRequest,
    ) -> Result<(Issue, ApiResponse)> {
        const OP: &str = "issue.create";

        let path = issues_path(owner, repo).map_err(|e| e.with_op(OP))?;
        let request = self
            .client
            .new_request(Method::POST, &path, Some(issue))
            .map_err(|e| e.with_op(OP))?;

        let (issue, response): (Issue, _) = self
            .client
            .execute(request)
            .await
            .map_err(|e| e.with_op(OP))?;

        debug!(number = ?issue.number, status = %response.status, "Create issue finished");
        Ok((issue, response))
    }

    /// Get an issue from the specified repository.
    ///
    /// `GET /repos/{owner}/{repo}/issues/{number}`, expect 200 on success.
    #[instrument(skip(self))]
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> Result<(Issue, ApiResponse)> {
        const OP: &str = "issue.get";

        let path = issue_path(owner, repo, number).map_err(|e| e.with_op(OP))?;
        let request = self
            .client
            .new_request::<()>(Method::GET, &path, None)
            .map_err(|e| e.with_op(OP))?;

        let (issue, response): (Issue, _) = self
            .client
            .execute(request)
            .await
            .map_err(|e| e.with_op(OP))?;

        debug!(status = %response.status, "Get issue finished");
        Ok((issue, response))
    }

    /// Update an issue on the specified repository.
    ///
    /// `PATCH /repos/{owner}/{repo}/issues/{number}`, expect 200 on success.
    /// Only fields present in `issue` are changed.
    #[instrument(skip(self, issue))]
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        issue: &IssueRequest,
    ) -> Result<(Issue, ApiResponse)> {
        const OP: &str = "issue.update";

        let path = issue_path(owner, repo, number).map_err(|e| e.with_op(OP))?;
        let request = self
            .client
            .new_request(Method::PATCH, &path, Some(issue))
            .map_err(|e| e.with_op(OP))?;

        let (issue, response): (Issue, _) = self
            .client
            .execute(request)
            .await
            .map_err(|e| e.with_op(OP))?;

        debug!(status = %response.status, "Update issue finished");
        Ok((issue, response))
    }
}

/// Path of the issues collection for a repository.
fn issues_path(owner: &str, repo: &str) -> Result<String> {
    Ok(format!(
        "/repos/{}/{}/issues",
        path_segment(owner)?,
        path_segment(repo)?
    ))
}

/// Path of a single issue.
fn issue_path(owner: &str, repo: &str, number: u64) -> Result<String> {
    Ok(format!("{}/{}", issues_path(owner, repo)?, number))
}

/// Percent-encode one path segment.
///
/// Empty, `.` and `..` survive encoding unchanged and would collapse or
/// climb out of `/repos/` during resolution, so they are refused.
fn path_segment(value: &str) -> Result<Cow<'_, str>> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(ApiError::InvalidPath {
            path: value.to_string(),
            reason: "owner and repo must be non-empty and not '.' or '..'".to_string(),
        });
    }
    Ok(urlencoding::encode(value))
}
