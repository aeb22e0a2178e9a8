//! Centralized error types for gh-issues.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::error::{ApiError, ErrorKind};
use crate::config::ConfigError;
use crate::editor::ExternalEditorError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Editor errors while capturing an issue body.
    #[error("{0}")]
    Editor(#[from] ExternalEditorError),

    /// The command-line arguments are inconsistent.
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        AppError::Usage(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::NotFound(path) => {
                    format!("Config file '{}' does not exist.", path.display())
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(e) => {
                    format!("Configuration file is invalid: {}", e.message())
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => api_message(e),
            AppError::Editor(e) => format!("Could not capture issue body: {}", e),
            AppError::Usage(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NoConfigDir)
            | AppError::Config(ConfigError::NotFound(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Pass --owner, --repo and --token, or create ~/.config/gh-issues/config.toml.")
            }
            AppError::Config(ConfigError::ReadError(_))
            | AppError::Config(ConfigError::ParseError(_)) => {
                Some("Fix the file named by --config, or ~/.config/gh-issues/config.toml.")
            }
            AppError::Api(e) => match e.kind() {
                ErrorKind::Config => Some("Check the token and base URL in your configuration."),
                ErrorKind::Transport => Some("Check your internet connection and base URL."),
                ErrorKind::Status => match e.status() {
                    Some(StatusCode::UNAUTHORIZED) => Some(
                        "Check your token at https://github.com/settings/tokens",
                    ),
                    Some(StatusCode::NOT_FOUND) => {
                        Some("Check the owner, repo and issue number, and that the token can see the repository.")
                    }
                    _ => None,
                },
                _ => None,
            },
            AppError::Editor(ExternalEditorError::EditorSpawn { .. }) => {
                Some("Set --editor, the 'editor' config key, or $EDITOR to an installed editor.")
            }
            AppError::Editor(_) => Some("Use --body to pass the issue body directly."),
            AppError::Usage(_) => None,
        }
    }
}

/// Describe an API error without its operation prefix.
fn api_message(e: &ApiError) -> String {
    match e.root() {
        ApiError::InvalidBaseUrl { url, .. } => format!("Invalid GitHub base URL '{}'.", url),
        ApiError::InvalidToken => "The GitHub token contains invalid characters.".to_string(),
        ApiError::InvalidPath { path, .. } => format!("Invalid request path '{}'.", path),
        ApiError::Serialize(_) => "Could not encode the request.".to_string(),
        ApiError::Network(_) => {
            "Connection failed. Please check your internet connection.".to_string()
        }
        ApiError::Decode { status, .. } => {
            format!("Unexpected response from GitHub (HTTP {}).", status)
        }
        ApiError::UnexpectedStatus { actual, .. } => match *actual {
            StatusCode::UNAUTHORIZED => {
                "Authentication failed. Please check your GitHub token.".to_string()
            }
            StatusCode::FORBIDDEN => {
                "Access denied. The token lacks permission for this repository.".to_string()
            }
            StatusCode::NOT_FOUND => "Issue or repository not found.".to_string(),
            StatusCode::GONE => "Issues are disabled for this repository.".to_string(),
            StatusCode::UNPROCESSABLE_ENTITY => {
                "GitHub rejected the request as invalid.".to_string()
            }
            other => format!("Invalid status code: {}", other.as_u16()),
        },
        ApiError::Operation { .. } => e.to_string(),
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
