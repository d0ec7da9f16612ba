//! Cross-platform formatter execution.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use log::debug;
use presave_core::{FormatRequest, FormatResult, PresaveError, Result, clean_diagnostics};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;

/// Stops a console window from appearing for the child process.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs formatter processes.
#[derive(Debug, Clone, Default)]
pub struct FormatterRunner {
    /// Working directory for the child, inherited when unset.
    working_dir: Option<PathBuf>,

    /// Extra environment variables.
    env: HashMap<String, String>,
}

impl FormatterRunner {
    /// Creates a runner that inherits the current directory and environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory of spawned formatters.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Adds environment variables.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    /// Runs the formatter over the request input.
    ///
    /// The input is written to stdin while stdout and stderr are collected,
    /// then the call waits for the process to exit. A nonzero exit status is
    /// not an error here; only failing to run the process is.
    pub async fn run(&self, request: &FormatRequest, file_path: Option<&Path>) -> Result<FormatResult> {
        let argv = request.argv(file_path)?;
        let (program, args) = argv.split_first().ok_or(PresaveError::NoProgram)?;
        let display = argv.join(" ");

        debug!("running formatter: {}", display);

        let mut command = TokioCommand::new(program);
        command
            .args(args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command.spawn().map_err(|source| PresaveError::Spawn {
            command: display.clone(),
            source,
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("formatter stdin was not captured"))?;

        let input = request.input.as_bytes();
        let write = async move {
            let result = stdin.write_all(input).await;
            // Closing stdin signals end of input.
            drop(stdin);
            result
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if let Err(e) = written {
            // The formatter may exit without reading all of its input.
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = if exit_code == 0 {
            String::from_utf8(output.stdout).map_err(|_| PresaveError::InvalidOutput {
                tool: request.tool().to_string(),
            })?
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        let stderr = clean_diagnostics(&String::from_utf8_lossy(&output.stderr));

        debug!(
            "{} exited with {} ({} bytes out)",
            request.tool(),
            exit_code,
            stdout.len()
        );

        Ok(FormatResult {
            exit_code,
            stdout,
            stderr,
        })
    }
}
