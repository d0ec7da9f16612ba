//! Pre-save command implementation.
//!
//! Runs the save hook for one file: the on-save rule decides, then the
//! formatter runs and the file is written back if its text changed.

use std::path::Path;

use log::debug;
use miette::{Result, miette};
use presave_engine::{FormatOutcome, FormatterRunner, PreSaveListener, SaveOutcome, SkipReason};

use crate::discovery;
use crate::host::{FileBuffer, TerminalHost};
use crate::output;

/// Handles one save event. Settings are loaded fresh for every call.
pub async fn handle_save(
    settings_path: Option<&Path>,
    file: &Path,
    syntax: Option<&str>,
) -> Result<SaveOutcome> {
    let start_dir = discovery::start_dir(file);
    let settings = discovery::load_settings(settings_path, &start_dir)?;
    let syntax = discovery::syntax_for(file, syntax)?;

    if !settings.is_applicable(&syntax) {
        debug!("no settings for syntax '{}'", syntax);
        return Ok(SaveOutcome::Skipped(SkipReason::NotApplicable));
    }

    let mut buffer = FileBuffer::load(file).map_err(|e| miette!("{}", e))?;
    let listener = PreSaveListener::new(FormatterRunner::new().with_working_dir(&start_dir));
    let outcome = listener
        .on_pre_save(&settings, &syntax, &mut buffer, &TerminalHost)
        .await;

    if let SaveOutcome::Formatted(FormatOutcome::Formatted { .. }) = outcome {
        buffer.save().map_err(|e| miette!("{}", e))?;
    }

    Ok(outcome)
}

/// Prints the outcome of a save event.
pub fn report(file: &Path, outcome: &SaveOutcome) {
    let path = file.display().to_string();

    match outcome {
        SaveOutcome::Skipped(reason) => output::file_skipped(&path, skip_label(*reason)),
        SaveOutcome::Formatted(FormatOutcome::Formatted { changed }) => {
            output::file_formatted(&path, *changed)
        }
        // Failures and errors were already reported by the host.
        SaveOutcome::Formatted(FormatOutcome::Failed { .. }) | SaveOutcome::Error(_) => {}
    }
}

/// Executes the save hook for a file.
pub async fn execute(settings_path: Option<&Path>, file: &Path, syntax: Option<&str>) -> Result<()> {
    let outcome = handle_save(settings_path, file, syntax).await?;
    report(file, &outcome);

    match outcome {
        SaveOutcome::Formatted(FormatOutcome::Failed { tool, exit_code }) => {
            Err(miette!("{} exited with status {}", tool, exit_code))
        }
        SaveOutcome::Error(message) => Err(miette!("{}", message)),
        _ => Ok(()),
    }
}

fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NotApplicable => "no settings for this syntax",
        SkipReason::Unnamed => "unnamed buffer",
        SkipReason::Excluded => "excluded",
    }
}
