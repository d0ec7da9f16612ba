//! Cleanup of formatter diagnostic text.

use std::sync::LazyLock;

use regex::Regex;

/// SGR colour sequences such as `ESC[31m` and `ESC[0m`.
static ANSI_COLOUR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[\d{1,2}m").unwrap());

/// Removes ANSI colour codes and surrounding whitespace from diagnostic text.
pub fn clean_diagnostics(text: &str) -> String {
    ANSI_COLOUR.replace_all(text, "").trim().to_string()
}
