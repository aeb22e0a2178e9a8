//! Configuration file schema.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor command used to write issue bodies.
    #[serde(default)]
    pub editor: Option<String>,
    /// GitHub connection settings.
    #[serde(default)]
    pub github: GithubSettings,
}

/// Repository and credentials for the GitHub API.
///
/// The token is kept out of `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSettings {
    /// Owner (user or organization) of the repository.
    #[serde(default)]
    pub owner: String,
    /// Repository name.
    #[serde(default)]
    pub repo: String,
    /// Personal access token.
    #[serde(default)]
    pub token: String,
    /// API base URL, for GitHub Enterprise.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GithubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubSettings")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Values from command-line flags that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub editor: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Apply flag overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(editor) = &overrides.editor {
            self.editor = Some(editor.clone());
        }
        if let Some(owner) = &overrides.owner {
            self.github.owner = owner.clone();
        }
        if let Some(repo) = &overrides.repo {
            self.github.repo = repo.clone();
        }
        if let Some(token) = &overrides.token {
            self.github.token = token.clone();
        }
        if let Some(base_url) = &overrides.base_url {
            self.github.base_url = Some(base_url.clone());
        }
        self
    }

    /// Validate this configuration.
    pub fn validate(&self) -> Result<()> {
        self.github.validate()
    }
}

impl GithubSettings {
    /// Validate the GitHub settings.
    ///
    /// Checks that:
    /// - owner and repo are non-empty single path segments
    /// - the token is non-empty
    /// - the base URL, if set, uses http:// or https://
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        validate_segment("owner", &self.owner)?;
        validate_segment("repo", &self.repo)?;

        if self.token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "github.token cannot be empty (use --token or the config file)".to_string(),
            ));
        }

        if let Some(url) = &self.base_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::ValidationError(format!(
                    "github.base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }

        Ok(())
    }
}

fn validate_segment(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "github.{} cannot be empty (use --{} or the config file)",
            name, name
        )));
    }

    if value.contains('/') || value.contains(char::is_whitespace) {
        return Err(ConfigError::ValidationError(format!(
            "github.{} '{}' cannot contain '/' or whitespace",
            name, value
        )));
    }

    if value == "." || value == ".." {
        return Err(ConfigError::ValidationError(format!(
            "github.{} cannot be '{}'",
            name, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> GithubSettings {
        GithubSettings {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            token: "ghp_abc".to_string(),
            base_url: None,
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_empty_owner_rejected() {
        let settings = GithubSettings {
            owner: String::new(),
            ..valid_settings()
        };
        let result = settings.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("owner cannot be empty"));
    }

    #[test]
    fn test_repo_with_slash_rejected() {
        let settings = GithubSettings {
            repo: "octo/hello".to_string(),
            ..valid_settings()
        };
        let result = settings.validate();
        assert!(result.unwrap_err().to_string().contains("cannot contain"));
    }

    #[test]
    fn test_dot_segments_rejected() {
        for value in [".", ".."] {
            let owner = GithubSettings {
                owner: value.to_string(),
                ..valid_settings()
            };
            assert!(matches!(owner.validate(), Err(ConfigError::ValidationError(_))));

            let repo = GithubSettings {
                repo: value.to_string(),
                ..valid_settings()
            };
            assert!(matches!(repo.validate(), Err(ConfigError::ValidationError(_))));
        }

        let dotted = GithubSettings {
            repo: "hello.rs".to_string(),
            ..valid_settings()
        };
        assert!(dotted.validate().is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let settings = GithubSettings {
            token: "  ".to_string(),
            ..valid_settings()
        };
        let result = settings.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("token cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_scheme_rejected() {
        let settings = GithubSettings {
            base_url: Some("ghe.local/api/v3".to_string()),
            ..valid_settings()
        };
        let result = settings.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_http_base_url_accepted() {
        let settings = GithubSettings {
            base_url: Some("http://localhost:8080/".to_string()),
            ..valid_settings()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let debug_output = format!("{:?}", valid_settings());
        assert!(!debug_output.contains("ghp_abc"));
    }

    #[test]
    fn test_overrides_only_replace_given_values() {
        let config = Config {
            editor: Some("nano".to_string()),
            github: valid_settings(),
        };
        let overrides = Overrides {
            token: Some("new".to_string()),
            ..Default::default()
        };

        let config = config.with_overrides(&overrides);

        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.token, "new");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            editor: Some("vim".to_string()),
            github: valid_settings(),
        };

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }
}
