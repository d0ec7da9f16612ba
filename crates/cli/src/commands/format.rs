//! Format command implementation.

use std::path::Path;

use miette::{Result, miette};
use presave_engine::{FormatCommand, FormatOutcome, FormatterRunner};

use crate::discovery;
use crate::host::{FileBuffer, TerminalHost};
use crate::output;

/// Formats a file on demand, regardless of its on-save rule.
pub async fn execute(settings_path: Option<&Path>, file: &Path, syntax: Option<&str>) -> Result<()> {
    let start_dir = discovery::start_dir(file);
    let settings = discovery::load_settings(settings_path, &start_dir)?;
    let syntax = discovery::syntax_for(file, syntax)?;

    let mut buffer = FileBuffer::load(file).map_err(|e| miette!("{}", e))?;
    let command = FormatCommand::new(FormatterRunner::new().with_working_dir(&start_dir));

    match command.run(&settings, &syntax, &mut buffer, &TerminalHost).await {
        Some(FormatOutcome::Formatted { .. }) => {
            let written = buffer.save().map_err(|e| miette!("{}", e))?;
            output::file_formatted(&file.display().to_string(), written);
            Ok(())
        }
        Some(FormatOutcome::Failed { tool, exit_code }) => {
            Err(miette!("{} exited with status {}", tool, exit_code))
        }
        None => Err(miette!("{} was not formatted", file.display())),
    }
}
