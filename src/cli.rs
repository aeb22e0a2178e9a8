//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// A command line utility for working with GitHub issues.
#[derive(Parser, Debug)]
#[command(name = "gh-issues", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default is <config dir>/gh-issues/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalArgs,
}

/// Flags that override values from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Editor used to write issue bodies
    #[arg(long, global = true)]
    pub editor: Option<String>,

    /// Owner of the repository
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// GitHub token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

impl From<GlobalArgs> for Overrides {
    fn from(args: GlobalArgs) -> Self {
        Overrides {
            editor: args.editor,
            owner: args.owner,
            repo: args.repo,
            token: args.token,
            base_url: args.base_url,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new issue on the specified repository
    Create {
        /// Issue title
        #[arg(long)]
        title: String,

        /// Issue body; opens the editor when omitted
        #[arg(long)]
        body: Option<String>,

        /// Label to apply (repeatable)
        #[arg(long = "label", value_name = "LABEL")]
        labels: Vec<String>,

        /// Login to assign (repeatable)
        #[arg(long = "assignee", value_name = "LOGIN")]
        assignees: Vec<String>,
    },

    /// Get an issue from the specified repository
    Get {
        /// Issue number
        #[arg(long)]
        number: u64,
    },

    /// Update an issue on the specified repository
    Update {
        /// Issue number
        #[arg(long)]
        number: u64,

        /// New issue title
        #[arg(long)]
        title: Option<String>,

        /// New issue body; opens the editor when omitted
        #[arg(long, conflicts_with = "no_edit")]
        body: Option<String>,

        /// Leave the body unchanged instead of opening the editor
        #[arg(long)]
        no_edit: bool,
    },

    /// Reopen an issue on the specified repository
    Reopen {
        /// Issue number
        #[arg(long)]
        number: u64,
    },

    /// Close an issue on the specified repository
    Close {
        /// Issue number
        #[arg(long)]
        number: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "gh-issues", "create", "--title", "Bug", "--label", "a", "--label", "b",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Create {
                title: "Bug".to_string(),
                body: None,
                labels: vec!["a".to_string(), "b".to_string()],
                assignees: vec![],
            }
        );
    }

    #[test]
    fn test_create_requires_title() {
        assert!(Cli::try_parse_from(["gh-issues", "create"]).is_err());
    }

    #[test]
    fn test_get_requires_number() {
        assert!(Cli::try_parse_from(["gh-issues", "get"]).is_err());
        assert!(Cli::try_parse_from(["gh-issues", "get", "--number", "x"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gh-issues", "get", "--number", "3", "--owner", "octo", "--repo", "hello",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::Get { number: 3 });
        let overrides: Overrides = cli.overrides.into();
        assert_eq!(overrides.owner.as_deref(), Some("octo"));
        assert_eq!(overrides.repo.as_deref(), Some("hello"));
        assert_eq!(overrides.token, None);
    }

    #[test]
    fn test_update_body_conflicts_with_no_edit() {
        let result = Cli::try_parse_from([
            "gh-issues", "update", "--number", "1", "--body", "x", "--no-edit",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_flag() {
        let cli =
            Cli::try_parse_from(["gh-issues", "--config", "/tmp/c.toml", "reopen", "--number", "2"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(cli.command, Command::Reopen { number: 2 });
    }
}
