//! Format requests and results.

use std::path::Path;

use crate::error::{PresaveError, Result};

/// Command line of the legacy single-tool setup.
pub const ELM_FORMAT_COMMAND_LINE: [&str; 3] = ["elm-format", "--stdin", "--yes"];

/// A single request to run a formatter over a whole buffer.
#[derive(Debug, Clone)]
pub struct FormatRequest {
    /// Program followed by its fixed arguments.
    pub command_line: Vec<String>,

    /// Whether the buffer's file path is passed as the last argument.
    pub append_file_path: bool,

    /// Full buffer content fed on stdin.
    pub input: String,
}

/// Outcome of a formatter process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub exit_code: i32,
    pub stdout: String,

    /// Diagnostics with colour codes removed and whitespace trimmed.
    pub stderr: String,
}

impl FormatRequest {
    /// Creates a request for the given command line and buffer content.
    pub fn new(command_line: Vec<String>, input: impl Into<String>) -> Self {
        Self {
            command_line,
            append_file_path: false,
            input: input.into(),
        }
    }

    /// Sets whether the file path is appended to the command line.
    pub fn with_append_file_path(mut self, append: bool) -> Self {
        self.append_file_path = append;
        self
    }

    /// Name of the formatter, as written in the command line.
    pub fn tool(&self) -> &str {
        self.command_line.first().map(String::as_str).unwrap_or_default()
    }

    /// Builds the final argument vector, program first.
    pub fn argv(&self, file_path: Option<&Path>) -> Result<Vec<String>> {
        let mut argv = self.command_line.clone();

        if self.append_file_path {
            let path = file_path.ok_or(PresaveError::MissingFilePath)?;
            argv.push(path.to_string_lossy().into_owned());
        }

        Ok(argv)
    }
}

impl FormatResult {
    /// Returns true if the formatter exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
