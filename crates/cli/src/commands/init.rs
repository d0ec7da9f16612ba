//! Init command implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use miette::{Result, miette};
use presave_core::{ELM_FORMAT_COMMAND_LINE, LanguageRule, LanguageSettings};

use crate::discovery::SETTINGS_FILE_NAME;
use crate::output;

/// Builds the starter settings: elm-format on save, rustfmt on demand.
fn template() -> BTreeMap<String, LanguageSettings> {
    let elm = LanguageSettings::new(
        ELM_FORMAT_COMMAND_LINE
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
    .with_rule(
        LanguageRule::new()
            .with_include([".elm"])
            .with_exclude(["elm-stuff/"]),
    );

    let rust = LanguageSettings::new(vec![
        "rustfmt".to_string(),
        "--emit".to_string(),
        "stdout".to_string(),
    ])
    .with_rule(LanguageRule::new().with_enabled(false).with_include(["src/"]));

    BTreeMap::from([("elm".to_string(), elm), ("rs".to_string(), rust)])
}

/// Writes a starter settings file into `dir`.
pub fn execute_in(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(SETTINGS_FILE_NAME);

    if path.exists() && !force {
        return Err(miette!(
            "{} already exists. Use --force to overwrite.",
            SETTINGS_FILE_NAME
        ));
    }

    let content = serde_json::to_string_pretty(&template())
        .map_err(|e| miette!("Failed to serialize settings: {}", e))?;

    fs::write(&path, content + "\n")
        .map_err(|e| miette!("Failed to write {}: {}", SETTINGS_FILE_NAME, e))?;

    output::success(&format!("Created {}", SETTINGS_FILE_NAME));
    output::info("Run 'presave list' to see configured languages");

    Ok(())
}

/// Initializes settings in the current directory.
pub fn execute(force: bool) -> Result<()> {
    let cwd =
        std::env::current_dir().map_err(|e| miette!("Cannot get current directory: {}", e))?;
    execute_in(&cwd, force)
}
