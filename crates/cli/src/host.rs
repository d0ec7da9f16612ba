//! Terminal host: files on disk as buffers, the terminal as UI.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use presave_core::{PresaveError, Result};
use presave_engine::{Buffer, Host};

use crate::output;

/// A file loaded into memory; written back only when its text changed.
#[derive(Debug)]
pub struct FileBuffer {
    path: PathBuf,
    original: String,
    text: String,
}

impl FileBuffer {
    /// Reads a file into a buffer. The path is made absolute so that rules
    /// and formatters see the full file path.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = std::path::absolute(path.into())?;
        let text = fs::read_to_string(&path).map_err(|source| PresaveError::FileRead {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            original: text.clone(),
            text,
        })
    }

    /// Returns true if the text differs from what is on disk.
    pub fn is_dirty(&self) -> bool {
        self.text != self.original
    }

    /// Writes the buffer back if it changed. Returns whether it wrote.
    pub fn save(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }

        fs::write(&self.path, &self.text).map_err(|source| PresaveError::FileWrite {
            path: self.path.clone(),
            source,
        })?;
        self.original = self.text.clone();

        Ok(true)
    }
}

impl Buffer for FileBuffer {
    fn file_name(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn contents(&self) -> String {
        self.text.clone()
    }

    fn replace_all(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Reports to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalHost;

impl Host for TerminalHost {
    fn console(&self, text: &str) {
        debug!("formatter diagnostics: {} bytes", text.len());
        output::console_dump(text);
    }

    fn status_message(&self, message: &str) {
        output::status(message);
    }

    fn error_message(&self, message: &str) {
        output::error(message);
    }
}
