//! Console rendering of issues.

use crate::api::Issue;

/// Format an issue as a single line.
///
/// Layout: number left-aligned in 5 columns, author login right-aligned and
/// cut to 9 characters, title cut to 55 characters, then the body quoted and
/// escaped so it stays on one line.
pub fn format_issue(issue: &Issue) -> String {
    format!(
        "#{:<5} {:>9.9} {:.55} {:?}",
        issue.number.unwrap_or_default(),
        issue.author(),
        issue.title.as_deref().unwrap_or_default(),
        issue.body.as_deref().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;

    #[test]
    fn test_format_issue() {
        let issue = Issue {
            number: Some(42),
            title: Some("Crash on start".to_string()),
            body: Some("Steps:\n1. run".to_string()),
            user: Some(User {
                login: Some("octocat".to_string()),
                html_url: None,
            }),
            ..Default::default()
        };

        assert_eq!(
            format_issue(&issue),
            "#42      octocat Crash on start \"Steps:\\n1. run\""
        );
    }

    #[test]
    fn test_format_issue_truncates() {
        let issue = Issue {
            number: Some(1),
            title: Some("t".repeat(60)),
            user: Some(User {
                login: Some("averylonglogin".to_string()),
                html_url: None,
            }),
            ..Default::default()
        };

        let line = format_issue(&issue);
        assert!(line.starts_with("#1     averylong "));
        assert!(line.contains(&"t".repeat(55)));
        assert!(!line.contains(&"t".repeat(56)));
    }

    #[test]
    fn test_format_issue_missing_fields() {
        assert_eq!(format_issue(&Issue::default()), "#0                \"\"");
    }
}
