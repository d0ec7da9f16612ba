//! Settings keyed by syntax identifier.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PresaveError, Result};
use crate::request::FormatRequest;
use crate::rule::{Gate, LanguageRule};

/// Settings for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// Include/exclude rule for on-save formatting.
    #[serde(flatten)]
    pub rule: LanguageRule,

    /// Formatter program followed by its fixed arguments.
    #[serde(default)]
    pub command_line: Vec<String>,

    /// Pass the file path as the last argument.
    #[serde(default)]
    pub append_file_path_to_command_line: bool,

    /// Legacy on-save value; replaces `rule` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_save: Option<Value>,
}

/// All language settings from one or more settings files.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Display name of the settings source, used in error messages.
    pub name: String,

    /// Settings files merged into this value, lowest priority first.
    pub sources: Vec<PathBuf>,

    /// Language settings by syntax identifier.
    pub languages: BTreeMap<String, LanguageSettings>,
}

impl LanguageSettings {
    /// Creates settings for the given command line, formatting nothing on save.
    pub fn new(command_line: Vec<String>) -> Self {
        Self {
            rule: LanguageRule::new(),
            command_line,
            append_file_path_to_command_line: false,
            on_save: None,
        }
    }

    /// Sets the on-save rule.
    pub fn with_rule(mut self, rule: LanguageRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets whether the file path is appended to the command line.
    pub fn with_append_file_path(mut self, append: bool) -> Self {
        self.append_file_path_to_command_line = append;
        self
    }

    /// Sets the legacy on-save value.
    pub fn with_on_save(mut self, value: Value) -> Self {
        self.on_save = Some(value);
        self
    }

    /// Resolves the on-save gate. `settings` names the source for errors.
    pub fn gate(&self, settings: &str) -> Result<Gate> {
        match &self.on_save {
            Some(value) => Gate::from_legacy(value, settings),
            None => Ok(Gate::Rule(self.rule.clone())),
        }
    }

    /// Builds a request formatting `input` with this language's formatter.
    pub fn request(&self, syntax: &str, input: impl Into<String>) -> Result<FormatRequest> {
        if self.command_line.is_empty() {
            return Err(PresaveError::EmptyCommandLine(syntax.to_string()));
        }

        Ok(FormatRequest::new(self.command_line.clone(), input)
            .with_append_file_path(self.append_file_path_to_command_line))
    }
}

impl Settings {
    /// Creates empty settings with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            languages: BTreeMap::new(),
        }
    }

    /// Parses settings from JSON text read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let languages: BTreeMap<String, LanguageSettings> =
            serde_json::from_str(content).map_err(|e| PresaveError::SettingsParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name: display_name(path),
            sources: vec![path.to_path_buf()],
            languages,
        })
    }

    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PresaveError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Overlays `other` on top of `self`; its entries win per syntax key.
    pub fn merge(mut self, other: Settings) -> Self {
        self.languages.extend(other.languages);
        self.sources.extend(other.sources);
        self.name = other.name;
        self
    }

    /// Adds settings for a language.
    pub fn add_language(&mut self, syntax: impl Into<String>, settings: LanguageSettings) {
        self.languages.insert(syntax.into(), settings);
    }

    /// Gets the settings for a syntax.
    pub fn get(&self, syntax: &str) -> Option<&LanguageSettings> {
        self.languages.get(syntax)
    }

    /// Returns true if there are settings for the syntax.
    pub fn is_applicable(&self, syntax: &str) -> bool {
        self.languages.contains_key(syntax)
    }

    /// Returns all configured syntax identifiers, sorted.
    pub fn syntaxes(&self) -> Vec<&str> {
        self.languages.keys().map(|s| s.as_str()).collect()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
