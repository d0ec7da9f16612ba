//! Error types for presave.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for presave operations.
pub type Result<T> = std::result::Result<T, PresaveError>;

/// Main error type for presave.
#[derive(Debug, Error)]
pub enum PresaveError {
    #[error(".presave.json not found in {0} or any parent directory")]
    SettingsNotFound(PathBuf),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    #[error("\"{key}\" in \"{settings}\" has an invalid value")]
    InvalidOnSave { key: String, settings: String },

    #[error("No settings for syntax '{0}'")]
    UnknownSyntax(String),

    #[error("Command line for syntax '{0}' is empty")]
    EmptyCommandLine(String),

    #[error("Format request has an empty command line")]
    NoProgram,

    #[error("Cannot append the file path to the command line of an unnamed buffer")]
    MissingFilePath,

    #[error("Failed to start {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} produced no output despite exiting successfully")]
    EmptyOutput { tool: String },

    #[error("{tool} produced output that is not valid UTF-8")]
    InvalidOutput { tool: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
