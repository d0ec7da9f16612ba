//! The pre-save hook.

use log::{debug, error};
use presave_core::{Result, Settings};

use crate::command::{FormatOutcome, format_buffer};
use crate::host::{Buffer, Host};
use crate::runner::FormatterRunner;

/// Why a save did not trigger formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No settings exist for the buffer's syntax.
    NotApplicable,

    /// The buffer has no file name to match against.
    Unnamed,

    /// The language's on-save rule rejected the path.
    Excluded,
}

/// Result of a pre-save event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Skipped(SkipReason),
    Formatted(FormatOutcome),

    /// An error was shown to the user.
    Error(String),
}

/// Decides whether a save of `path` with the given syntax triggers formatting.
///
/// Syntaxes without settings never do. Fails only on a malformed legacy
/// `on_save` value.
pub fn should_format_on_save(settings: &Settings, syntax: &str, path: &str) -> Result<bool> {
    let Some(language) = settings.get(syntax) else {
        return Ok(false);
    };

    let decision = language.gate(&settings.name)?.should_format(path);
    debug!("on-save gate for {} ({}): {}", path, syntax, decision);
    Ok(decision)
}

/// Formats buffers right before they are saved.
#[derive(Debug, Clone, Default)]
pub struct PreSaveListener {
    runner: FormatterRunner,
}

impl PreSaveListener {
    /// Creates a listener using the given runner.
    pub fn new(runner: FormatterRunner) -> Self {
        Self { runner }
    }

    /// Handles a pre-save event.
    ///
    /// Settings are passed in on every call so that edits between saves are
    /// honoured. Any error is shown through the host and reported as
    /// [`SaveOutcome::Error`].
    pub async fn on_pre_save<B, H>(
        &self,
        settings: &Settings,
        syntax: &str,
        buffer: &mut B,
        host: &H,
    ) -> SaveOutcome
    where
        B: Buffer + ?Sized,
        H: Host + ?Sized,
    {
        match self.try_pre_save(settings, syntax, buffer, host).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("pre-save format failed: {}", e);
                let message = e.to_string();
                host.error_message(&message);
                SaveOutcome::Error(message)
            }
        }
    }

    async fn try_pre_save<B, H>(
        &self,
        settings: &Settings,
        syntax: &str,
        buffer: &mut B,
        host: &H,
    ) -> Result<SaveOutcome>
    where
        B: Buffer + ?Sized,
        H: Host + ?Sized,
    {
        let Some(language) = settings.get(syntax) else {
            return Ok(SaveOutcome::Skipped(SkipReason::NotApplicable));
        };

        let Some(path) = buffer.file_name().map(|p| p.to_string_lossy().into_owned()) else {
            return Ok(SaveOutcome::Skipped(SkipReason::Unnamed));
        };

        if !should_format_on_save(settings, syntax, &path)? {
            return Ok(SaveOutcome::Skipped(SkipReason::Excluded));
        }

        let request = language.request(syntax, buffer.contents())?;
        let outcome = format_buffer(&self.runner, &request, buffer, host).await?;

        Ok(SaveOutcome::Formatted(outcome))
    }
}
