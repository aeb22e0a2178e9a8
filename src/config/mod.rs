//! Configuration management for gh-issues.
//!
//! Configuration is read from a TOML file and then overridden by command-line
//! flags. The default location is `<config dir>/gh-issues/config.toml`.

mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use settings::{Config, GithubSettings, Overrides};

/// Application directory name under the platform config directory.
const APP_DIR: &str = "gh-issues";

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("cannot read config: {0}")]
    ReadError(#[from] io::Error),

    /// The config file is not valid TOML or has the wrong shape.
    #[error("unable to decode config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A required setting is missing or malformed.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the default config file path.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration, apply flag overrides, and validate the result.
///
/// With `path` set the file must exist. Without it, the default file is
/// read if present; flags alone may supply every setting.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Config::from_file(path)?
        }
        None => match default_config_path() {
            Ok(path) if path.exists() => Config::from_file(&path)?,
            Ok(path) => {
                debug!(path = %path.display(), "No config file, using flags only");
                Config::default()
            }
            Err(ConfigError::NoConfigDir) => Config::default(),
            Err(e) => return Err(e),
        },
    };

    let config = config.with_overrides(overrides);
    config.validate()?;

    info!(owner = %config.github.owner, repo = %config.github.repo, "Configuration loaded");
    Ok(config)
}

impl Config {
    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading config file");
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
editor = "nano"

[github]
owner = "octo"
repo = "hello"
token = "ghp_abc"
"#,
        );

        let config = load(Some(file.path()), &Overrides::default()).unwrap();

        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.repo, "hello");
        assert_eq!(config.github.token, "ghp_abc");
        assert_eq!(config.github.base_url, None);
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_config(
            r#"
[github]
owner = "octo"
repo = "hello"
token = "ghp_abc"
"#,
        );
        let overrides = Overrides {
            repo: Some("other".to_string()),
            editor: Some("vim".to_string()),
            ..Default::default()
        };

        let config = load(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.repo, "other");
        assert_eq!(config.editor.as_deref(), Some("vim"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load(
            Some(Path::new("/nonexistent/gh-issues/config.toml")),
            &Overrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[github\nowner = ");
        let result = load(Some(file.path()), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_required_setting_is_validation_error() {
        let file = write_config("[github]\nowner = \"octo\"\n");
        let result = load(Some(file.path()), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_default_config_path_structure() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("gh-issues/config.toml"));
        }
    }

    #[test]
    fn test_not_found_display() {
        let err = ConfigError::NotFound(PathBuf::from("/tmp/x.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/x.toml");
    }
}
