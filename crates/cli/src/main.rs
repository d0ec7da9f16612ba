//! Presave CLI - Run code formatters on save from the command line.

mod commands;
mod discovery;
mod host;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{Result, miette};

#[derive(Parser)]
#[command(name = "presave")]
#[command(
    author,
    version,
    about = "Run an external code formatter on save and swap the buffer with its output"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to settings file (auto-detected if not specified)
    #[arg(short = 's', long, global = true)]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a file now, ignoring its on-save rule
    Format {
        /// File to format
        file: PathBuf,

        /// Syntax identifier (file extension if not specified)
        #[arg(long)]
        syntax: Option<String>,
    },

    /// Run the save hook for a file
    PreSave {
        /// File being saved
        file: PathBuf,

        /// Syntax identifier (file extension if not specified)
        #[arg(long)]
        syntax: Option<String>,
    },

    /// Tell whether saving a file would format it
    Check {
        /// File to check
        file: PathBuf,

        /// Syntax identifier (file extension if not specified)
        #[arg(long)]
        syntax: Option<String>,
    },

    /// Run the save hook whenever a watched file changes
    Watch {
        /// Files or directories to watch
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Clear the screen before each save event
        #[arg(long)]
        clear: bool,
    },

    /// Validate settings
    Validate,

    /// List configured languages
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize a new settings file
    Init {
        /// Force overwrite existing settings
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = cli.settings.as_deref();

    match cli.command {
        Commands::Format { file, syntax } => {
            commands::format::execute(settings, &file, syntax.as_deref()).await?
        }

        Commands::PreSave { file, syntax } => {
            commands::pre_save::execute(settings, &file, syntax.as_deref()).await?
        }

        Commands::Check { file, syntax } => {
            let decision = commands::check::execute(settings, &file, syntax.as_deref())?;
            if !decision {
                return Ok(ExitCode::from(1));
            }
        }

        Commands::Watch { paths, clear } => {
            commands::watch::execute(settings, &paths, clear).await?
        }

        Commands::Validate => commands::validate::execute(settings, &current_dir()?)?,

        Commands::List { detailed } => {
            commands::list::execute(settings, &current_dir()?, detailed)?
        }

        Commands::Init { force } => commands::init::execute(force)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| miette!("Cannot get current directory: {}", e))
}
