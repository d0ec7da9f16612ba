//! Validate command implementation.

use std::path::Path;

use miette::{Result, miette};
use presave_core::Settings;

use crate::output;

/// Problems found in one language's settings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks every language in the settings.
pub fn check_settings(settings: &Settings) -> Findings {
    let mut findings = Findings::default();

    for (syntax, language) in &settings.languages {
        if let Err(e) = language.gate(&settings.name) {
            findings.errors.push(format!("{}: {}", syntax, e));
        }

        if language.on_save.is_none() && language.rule.enabled && language.rule.include.is_empty() {
            findings.warnings.push(format!(
                "{}: include is empty, so no file is formatted on save",
                syntax
            ));
        }

        match language.command_line.first() {
            None => findings
                .errors
                .push(format!("{}: command_line is empty", syntax)),
            Some(program) => {
                if which::which(program).is_err() {
                    findings.warnings.push(format!(
                        "{}: formatter '{}' was not found on PATH",
                        syntax, program
                    ));
                }
            }
        }
    }

    findings
}

/// Validates the settings that apply to `start_dir`.
pub fn execute(settings_path: Option<&Path>, start_dir: &Path) -> Result<()> {
    let settings = crate::discovery::load_settings(settings_path, start_dir)?;

    for source in &settings.sources {
        output::info(&format!("Validating {}...", source.display()));
    }

    let findings = check_settings(&settings);

    for warning in &findings.warnings {
        output::warning(warning);
    }

    for error in &findings.errors {
        output::error(error);
    }

    if !findings.errors.is_empty() {
        return Err(miette!(
            "Validation failed: {} error(s)",
            findings.errors.len()
        ));
    }

    output::success(&format!(
        "Settings are valid ({} languages)",
        settings.languages.len()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_settings() {
        let settings = Settings::parse(
            r#"{
                "elm": { "on_save": 3, "command_line": ["presave-no-such-formatter"] },
                "md": { "command_line": [] }
            }"#,
            Path::new("/p/.presave.json"),
        )
        .unwrap();

        let findings = check_settings(&settings);

        assert_eq!(
            findings.errors,
            vec![
                "elm: \"on_save\" in \".presave.json\" has an invalid value".to_string(),
                "md: command_line is empty".to_string(),
            ]
        );
        assert_eq!(
            findings.warnings,
            vec![
                "elm: formatter 'presave-no-such-formatter' was not found on PATH".to_string(),
                "md: include is empty, so no file is formatted on save".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_disabled_rule_without_include_is_fine() {
        let settings = Settings::parse(
            r#"{ "txt": { "enabled": false, "command_line": ["sh"] } }"#,
            Path::new("/p/.presave.json"),
        )
        .unwrap();

        assert_eq!(check_settings(&settings), Findings::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_valid_settings() {
        let settings = Settings::parse(
            r#"{ "txt": { "include": [""], "command_line": ["sh", "-c", "cat"] } }"#,
            Path::new("/p/.presave.json"),
        )
        .unwrap();

        assert_eq!(check_settings(&settings), Findings::default());
    }
}
