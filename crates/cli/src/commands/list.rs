//! List command implementation.

use std::path::Path;

use console::style;
use miette::{Result, miette};
use presave_core::Gate;

use crate::discovery;
use crate::output;

/// Lists all configured languages.
pub fn execute(settings_path: Option<&Path>, start_dir: &Path, detailed: bool) -> Result<()> {
    let settings = discovery::load_settings(settings_path, start_dir)?;

    output::section_header("Configured languages");

    for syntax in settings.syntaxes() {
        let Some(language) = settings.get(syntax) else {
            continue;
        };

        let on_save = language
            .gate(&settings.name)
            .map_err(|e| miette!("{}: {}", syntax, e))?;

        print!("  {}", style(syntax).cyan().bold());

        if !language.rule.enabled && language.on_save.is_none() {
            print!(" {}", style("(disabled)").yellow());
        }

        println!(" - {}", style(language.command_line.join(" ")).dim());

        if detailed {
            match &on_save {
                Gate::Fixed(value) => {
                    output::key_value("on_save", &value.to_string());
                }
                Gate::Rule(rule) => {
                    output::key_value("include", &rule.include.join(", "));
                    output::key_value("exclude", &rule.exclude.join(", "));
                }
            }

            if language.append_file_path_to_command_line {
                output::key_value("append file path", "yes");
            }

            println!();
        }
    }

    Ok(())
}
