//! Diagnostic log for `gh-issues` runs.
//!
//! Each invocation appends to `gh-issues.log` (rotated daily) under the
//! user's local data directory. Nothing is written to the terminal: stdout
//! is reserved for the rendered issue and the editor may own the tty.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset: this crate's request and
/// command events at info, dependencies only at warn.
const DEFAULT_LOG_FILTER: &str = "gh_issues=info,warn";

/// Install the global file subscriber.
///
/// Request spans from the API client (method, URL, status) and the command
/// outcome end up here. `RUST_LOG=gh_issues=debug` adds the editor command
/// line and per-endpoint finish events. The token never appears: the auth
/// header is sensitive and settings redact it in `Debug`.
///
/// Called once from `main`; a failure is reported as a warning and the
/// command still runs without a log.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "gh-issues.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gh-issues starting");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// `<data_local_dir>/gh-issues/logs`, e.g. `~/.local/share/gh-issues/logs` on Linux.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("gh-issues").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        let dir = get_log_directory().unwrap();
        assert!(dir.ends_with("gh-issues/logs"));
    }
}
