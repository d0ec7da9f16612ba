//! Check command implementation.

use std::path::Path;

use miette::{Result, miette};
use presave_engine::should_format_on_save;

use crate::discovery;
use crate::output;

/// Reports whether saving a file would format it. Returns the decision.
pub fn execute(settings_path: Option<&Path>, file: &Path, syntax: Option<&str>) -> Result<bool> {
    let settings = discovery::load_settings(settings_path, &discovery::start_dir(file))?;
    let syntax = discovery::syntax_for(file, syntax)?;
    let path = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    let path = path.to_string_lossy();

    let decision = should_format_on_save(&settings, &syntax, &path).map_err(|e| miette!("{}", e))?;

    if decision {
        output::success(&format!("{} is formatted on save", path));
    } else if settings.is_applicable(&syntax) {
        output::info(&format!("{} is not formatted on save", path));
    } else {
        output::info(&format!(
            "{} is not formatted on save (no settings for syntax '{}')",
            path, syntax
        ));
    }

    Ok(decision)
}
