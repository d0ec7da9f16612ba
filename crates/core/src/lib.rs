//! Presave Core - Settings, save-trigger rules and format requests.

mod ansi;
mod error;
mod request;
mod rule;
mod settings;

pub use ansi::clean_diagnostics;
pub use error::{PresaveError, Result};
pub use request::{ELM_FORMAT_COMMAND_LINE, FormatRequest, FormatResult};
pub use rule::{Gate, LanguageRule, ON_SAVE_KEY, should_format};
pub use settings::{LanguageSettings, Settings};
