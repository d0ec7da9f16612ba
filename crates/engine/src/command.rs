//! Formatting a buffer and applying the formatter's verdict.

use log::{error, warn};
use presave_core::{FormatRequest, FormatResult, PresaveError, Result, Settings};

use crate::host::{Buffer, Host};
use crate::runner::FormatterRunner;

/// What happened to a buffer after formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The buffer was replaced with the formatter's output.
    Formatted { changed: bool },

    /// The formatter exited with a nonzero status; the buffer is untouched.
    Failed { tool: String, exit_code: i32 },
}

/// Status message shown when a formatter fails.
pub fn failure_status(tool: &str) -> String {
    format!("{} failed - see console", tool).to_uppercase()
}

/// Applies a formatter result to the buffer.
///
/// Only a zero exit status with non-empty output replaces the buffer. A
/// nonzero exit is reported through the host and is not an error; empty
/// output after success is.
pub fn apply_result<B, H>(
    tool: &str,
    result: FormatResult,
    buffer: &mut B,
    host: &H,
) -> Result<FormatOutcome>
where
    B: Buffer + ?Sized,
    H: Host + ?Sized,
{
    if !result.success() {
        warn!("{} exited with status {}", tool, result.exit_code);
        host.console(&result.stderr);
        host.status_message(&failure_status(tool));
        return Ok(FormatOutcome::Failed {
            tool: tool.to_string(),
            exit_code: result.exit_code,
        });
    }

    if result.stdout.is_empty() {
        return Err(PresaveError::EmptyOutput {
            tool: tool.to_string(),
        });
    }

    let changed = buffer.contents() != result.stdout;
    buffer.replace_all(&result.stdout);

    Ok(FormatOutcome::Formatted { changed })
}

/// Runs the request over the whole buffer and applies the result.
pub async fn format_buffer<B, H>(
    runner: &FormatterRunner,
    request: &FormatRequest,
    buffer: &mut B,
    host: &H,
) -> Result<FormatOutcome>
where
    B: Buffer + ?Sized,
    H: Host + ?Sized,
{
    let file_name = buffer.file_name().map(|p| p.to_path_buf());
    let result = runner.run(request, file_name.as_deref()).await?;
    apply_result(request.tool(), result, buffer, host)
}

/// The on-demand format command.
#[derive(Debug, Clone, Default)]
pub struct FormatCommand {
    runner: FormatterRunner,
}

impl FormatCommand {
    /// Creates a format command using the given runner.
    pub fn new(runner: FormatterRunner) -> Self {
        Self { runner }
    }

    /// Formats the buffer with the formatter configured for `syntax`.
    ///
    /// Errors are shown through the host and never propagate.
    pub async fn run<B, H>(
        &self,
        settings: &Settings,
        syntax: &str,
        buffer: &mut B,
        host: &H,
    ) -> Option<FormatOutcome>
    where
        B: Buffer + ?Sized,
        H: Host + ?Sized,
    {
        match self.try_run(settings, syntax, buffer, host).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("format failed: {}", e);
                host.error_message(&e.to_string());
                None
            }
        }
    }

    /// Formats the buffer, returning errors to the caller.
    pub async fn try_run<B, H>(
        &self,
        settings: &Settings,
        syntax: &str,
        buffer: &mut B,
        host: &H,
    ) -> Result<FormatOutcome>
    where
        B: Buffer + ?Sized,
        H: Host + ?Sized,
    {
        let language = settings
            .get(syntax)
            .ok_or_else(|| PresaveError::UnknownSyntax(syntax.to_string()))?;
        let request = language.request(syntax, buffer.contents())?;

        format_buffer(&self.runner, &request, buffer, host).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryBuffer;
    use crate::host::testing::RecordingHost;

    fn result(exit_code: i32, stdout: &str, stderr: &str) -> FormatResult {
        FormatResult {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_success_replaces_buffer() {
        let mut buffer = MemoryBuffer::new("x=1");
        let host = RecordingHost::default();

        let outcome = apply_result("elm-format", result(0, "x = 1\n", ""), &mut buffer, &host).unwrap();

        assert_eq!(outcome, FormatOutcome::Formatted { changed: true });
        assert_eq!(buffer.text(), "x = 1\n");
        assert!(host.status.borrow().is_empty());
        assert!(host.console.borrow().is_empty());
    }

    #[test]
    fn test_success_with_same_text() {
        let mut buffer = MemoryBuffer::new("x = 1\n");
        let host = RecordingHost::default();

        let outcome = apply_result("elm-format", result(0, "x = 1\n", ""), &mut buffer, &host).unwrap();

        assert_eq!(outcome, FormatOutcome::Formatted { changed: false });
        assert_eq!(buffer.text(), "x = 1\n");
    }

    #[test]
    fn test_nonzero_exit_leaves_buffer() {
        let mut buffer = MemoryBuffer::new("x =");
        let host = RecordingHost::default();

        let outcome = apply_result(
            "elm-format",
            result(1, "partial", "I ran into something unexpected"),
            &mut buffer,
            &host,
        )
        .unwrap();

        assert_eq!(
            outcome,
            FormatOutcome::Failed {
                tool: "elm-format".to_string(),
                exit_code: 1
            }
        );
        assert_eq!(buffer.text(), "x =");
        assert_eq!(buffer.replacements(), 0);
        assert_eq!(
            *host.console.borrow(),
            vec!["I ran into something unexpected".to_string()]
        );
        assert_eq!(
            *host.status.borrow(),
            vec!["ELM-FORMAT FAILED - SEE CONSOLE".to_string()]
        );
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let mut buffer = MemoryBuffer::new("x = 1");
        let host = RecordingHost::default();

        let err = apply_result("black", result(0, "", ""), &mut buffer, &host).unwrap_err();

        assert!(matches!(err, PresaveError::EmptyOutput { .. }));
        assert_eq!(
            err.to_string(),
            "black produced no output despite exiting successfully"
        );
        assert_eq!(buffer.text(), "x = 1");
        assert_eq!(buffer.replacements(), 0);
    }

    #[test]
    fn test_failure_status() {
        assert_eq!(failure_status("rustfmt"), "RUSTFMT FAILED - SEE CONSOLE");
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use presave_core::LanguageSettings;

        fn settings(script: &str) -> Settings {
            let mut settings = Settings::new("test.json");
            settings.add_language(
                "txt",
                LanguageSettings::new(vec!["sh".into(), "-c".into(), script.into()]),
            );
            settings
        }

        #[tokio::test]
        async fn test_format_command_success() {
            let command = FormatCommand::default();
            let mut buffer = MemoryBuffer::new("hello\n").with_file_name("/notes/a.txt");
            let host = RecordingHost::default();

            let outcome = command
                .run(&settings("tr a-z A-Z"), "txt", &mut buffer, &host)
                .await;

            assert_eq!(outcome, Some(FormatOutcome::Formatted { changed: true }));
            assert_eq!(buffer.text(), "HELLO\n");
            assert!(host.errors.borrow().is_empty());
        }

        #[tokio::test]
        async fn test_format_command_failure() {
            let command = FormatCommand::default();
            let mut buffer = MemoryBuffer::new("hello\n");
            let host = RecordingHost::default();

            let outcome = command
                .run(
                    &settings("cat >/dev/null; echo 'bad input' >&2; exit 2"),
                    "txt",
                    &mut buffer,
                    &host,
                )
                .await;

            assert!(matches!(outcome, Some(FormatOutcome::Failed { exit_code: 2, .. })));
            assert_eq!(buffer.text(), "hello\n");
            assert_eq!(*host.console.borrow(), vec!["bad input".to_string()]);
            assert_eq!(*host.status.borrow(), vec!["SH FAILED - SEE CONSOLE".to_string()]);
        }

        #[tokio::test]
        async fn test_format_command_empty_output() {
            let command = FormatCommand::default();
            let mut buffer = MemoryBuffer::new("hello\n");
            let host = RecordingHost::default();

            let outcome = command
                .run(&settings("cat >/dev/null"), "txt", &mut buffer, &host)
                .await;

            assert_eq!(outcome, None);
            assert_eq!(buffer.text(), "hello\n");
            assert_eq!(
                *host.errors.borrow(),
                vec!["sh produced no output despite exiting successfully".to_string()]
            );
        }

        #[tokio::test]
        async fn test_format_command_unknown_syntax() {
            let command = FormatCommand::default();
            let mut buffer = MemoryBuffer::new("hello\n");
            let host = RecordingHost::default();

            let err = command
                .try_run(&settings("cat"), "md", &mut buffer, &host)
                .await
                .unwrap_err();

            assert!(matches!(err, PresaveError::UnknownSyntax(s) if s == "md"));
        }
    }
}
