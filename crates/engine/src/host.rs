//! Seams to the host that owns the text buffer and the UI.

use std::path::{Path, PathBuf};

/// A text buffer open in the host.
pub trait Buffer {
    /// Path of the file backing the buffer, if it has one.
    fn file_name(&self) -> Option<&Path>;

    /// Full buffer content.
    fn contents(&self) -> String;

    /// Replaces the full buffer content.
    fn replace_all(&mut self, text: &str);
}

/// User-facing reporting provided by the host.
pub trait Host {
    /// Writes text to the developer console.
    fn console(&self, text: &str);

    /// Shows a transient status message.
    fn status_message(&self, message: &str);

    /// Shows an error that needs the user's attention.
    fn error_message(&self, message: &str);
}

/// A buffer held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    file_name: Option<PathBuf>,
    text: String,
    replacements: usize,
}

impl MemoryBuffer {
    /// Creates a buffer with the given content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            file_name: None,
            text: text.into(),
            replacements: 0,
        }
    }

    /// Sets the backing file path.
    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    /// Current content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of times the content was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Buffer for MemoryBuffer {
    fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    fn contents(&self) -> String {
        self.text.clone()
    }

    fn replace_all(&mut self, text: &str) {
        self.text = text.to_string();
        self.replacements += 1;
    }
}
