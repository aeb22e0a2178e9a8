//! GitHub API request and response types.
//!
//! Every field is optional. A field that is `None` is left out of the JSON
//! entirely, which under PATCH means "leave unchanged"; `Some("")` or
//! `Some(vec![])` is sent and clears the field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitHub issue as returned by the server.
///
/// Returned by `POST /repos/{owner}/{repo}/issues` and
/// `GET|PATCH /repos/{owner}/{repo}/issues/{number}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The issue number, unique within the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// URL to view the issue on GitHub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// The issue title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The issue state, usually "open" or "closed".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// The issue author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// When the issue was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// The issue description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Issue {
    /// Get the author's login, or empty string if unknown.
    pub fn author(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.login.as_deref())
            .unwrap_or_default()
    }

    /// Check if the issue is open.
    pub fn is_open(&self) -> bool {
        self.state.as_deref() == Some("open")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {}",
            self.number.unwrap_or_default(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

/// A GitHub user reference embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// URL of the user's profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Issue fields sent when creating or updating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Logins to assign. Replaces the existing assignees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    /// Milestone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    /// Label names. Replaces the existing labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Single assignee login. Deprecated by GitHub in favor of `assignees`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Target state for transitions ("open" or "closed").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl IssueRequest {
    /// Create a request with only a title and body, as used by `create`.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Default::default()
        }
    }

    /// Create a request that only changes the issue state.
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Default::default()
        }
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_serializes_only_present_fields() {
        let request = IssueRequest {
            title: Some("t".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"title":"t"}"#);
    }

    #[test]
    fn test_empty_request_serializes_to_empty_object() {
        assert_eq!(
            serde_json::to_string(&IssueRequest::default()).unwrap(),
            "{}"
        );
        assert!(IssueRequest::default().is_empty());
    }

    #[test]
    fn test_explicit_empty_values_are_sent() {
        let request = IssueRequest {
            body: Some(String::new()),
            labels: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"body":"","labels":[]}"#
        );
        assert!(!request.is_empty());
    }

    #[test]
    fn test_request_field_order_and_names() {
        let request = IssueRequest {
            title: Some("Bug".to_string()),
            assignees: Some(vec!["a".to_string(), "b".to_string()]),
            milestone: Some(3),
            assignee: Some("a".to_string()),
            state: Some("closed".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"title":"Bug","assignees":["a","b"],"milestone":3,"assignee":"a","state":"closed"}"#
        );
    }

    #[test]
    fn test_with_state() {
        let request = IssueRequest::with_state("open");
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"state":"open"}"#);
    }

    #[test]
    fn test_issue_deserialize_full() {
        let json = r#"{
            "id": 1,
            "number": 1347,
            "html_url": "https://github.com/octocat/Hello-World/issues/1347",
            "title": "Found a bug",
            "state": "open",
            "user": {"login": "octocat", "html_url": "https://github.com/octocat", "id": 1},
            "created_at": "2011-04-22T13:33:48Z",
            "body": "I'm having a problem with this.",
            "labels": []
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();

        assert_eq!(issue.number, Some(1347));
        assert_eq!(issue.title.as_deref(), Some("Found a bug"));
        assert!(issue.is_open());
        assert_eq!(issue.author(), "octocat");
        assert_eq!(
            issue.created_at,
            Some(Utc.with_ymd_and_hms(2011, 4, 22, 13, 33, 48).unwrap())
        );
        assert_eq!(issue.to_string(), "#1347: Found a bug");
    }

    #[test]
    fn test_issue_deserialize_partial() {
        let issue: Issue = serde_json::from_str(r#"{"number":1,"title":"Issue"}"#).unwrap();
        assert_eq!(
            issue,
            Issue {
                number: Some(1),
                title: Some("Issue".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(issue.author(), "");
        assert!(!issue.is_open());
    }

    #[test]
    fn test_issue_null_fields_are_absent() {
        let issue: Issue = serde_json::from_str(r#"{"number":2,"body":null,"user":null}"#).unwrap();
        assert_eq!(issue.body, None);
        assert_eq!(issue.user, None);
    }

    #[test]
    fn test_unknown_state_is_kept() {
        let issue: Issue = serde_json::from_str(r#"{"state":"locked"}"#).unwrap();
        assert_eq!(issue.state.as_deref(), Some("locked"));
    }
}
