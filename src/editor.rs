//! External editor support for writing issue bodies.
//!
//! This module provides functionality to:
//! - Detect the user's preferred editor from settings or environment variables
//! - Create temporary files with content for editing
//! - Launch the external editor and wait for it to complete
//! - Read back the modified content and clean up temporary files

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use tempfile::TempPath;
use thiserror::Error;
use tracing::debug;

/// Editor used when neither settings nor environment name one.
const FALLBACK_EDITOR: &str = "vi";

/// Errors that can occur during external editor operations.
#[derive(Debug, Error)]
pub enum ExternalEditorError {
    /// The editor command is empty.
    #[error("No editor configured")]
    NoEditor,

    /// Failed to create the temporary file.
    #[error("Failed to create temporary file: {0}")]
    TempFileCreation(#[source] io::Error),

    /// Failed to spawn the editor process.
    #[error("Failed to launch editor '{editor}': {source}")]
    EditorSpawn {
        editor: String,
        #[source]
        source: io::Error,
    },

    /// Editor exited with a non-zero status code.
    #[error("Editor exited with status code {0}")]
    EditorExecution(i32),

    /// Editor was terminated by a signal.
    #[error("Editor was terminated by a signal")]
    EditorTerminated,

    /// Failed to read content back from the temporary file.
    #[error("Failed to read content from temporary file: {0}")]
    ContentRead(#[source] io::Error),
}

/// External editor utility for launching text editors with temporary files.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    /// The editor command line, e.g. `vim` or `code --wait`.
    editor: String,
}

impl ExternalEditor {
    /// Create an editor from an optional configured command.
    ///
    /// Falls back to `$EDITOR`, then `$VISUAL`, then `vi`.
    pub fn new(configured: Option<&str>) -> Self {
        let editor = configured
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(get_editor);
        Self { editor }
    }

    /// Create an external editor instance with a specific editor command.
    pub fn with_editor(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    /// Get the editor command that will be used.
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Open content in the external editor for editing.
    ///
    /// Writes `content` to a fresh temporary file whose name starts with
    /// `gh-issues-{label}-`, launches the editor on it, waits for it to exit,
    /// and returns what the file holds afterwards. The file is removed when
    /// this returns, whether or not the editor succeeded.
    pub fn open(&self, label: &str, content: &str) -> Result<String, ExternalEditorError> {
        let temp_path = create_temp_file(label, content)?;

        self.launch_editor(&temp_path)?;

        fs::read_to_string(&temp_path).map_err(ExternalEditorError::ContentRead)
    }

    /// Launch the editor process with the given file path.
    fn launch_editor(&self, path: &Path) -> Result<(), ExternalEditorError> {
        let mut parts = self.editor.split_whitespace();
        let program = parts.next().ok_or(ExternalEditorError::NoEditor)?;

        debug!(editor = %self.editor, path = %path.display(), "Launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| ExternalEditorError::EditorSpawn {
                editor: self.editor.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            match status.code() {
                Some(code) => Err(ExternalEditorError::EditorExecution(code)),
                None => Err(ExternalEditorError::EditorTerminated),
            }
        }
    }
}

impl Default for ExternalEditor {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Detect the user's preferred editor from environment variables.
///
/// Checks in this order:
/// 1. `$EDITOR`
/// 2. `$VISUAL`
/// 3. Falls back to `vi`
pub fn get_editor() -> String {
    env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Create a temporary file with the given content.
///
/// The name is `gh-issues-{label}-<random>.md` in the system temp directory.
/// The file is created exclusively, so a pre-planted file or symlink at a
/// guessable path is never written through. It is deleted when the returned
/// handle is dropped.
fn create_temp_file(label: &str, content: &str) -> Result<TempPath, ExternalEditorError> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("gh-issues-{}-", label))
        .suffix(".md")
        .tempfile()
        .map_err(ExternalEditorError::TempFileCreation)?;

    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(ExternalEditorError::TempFileCreation)?;

    Ok(file.into_temp_path())
}
