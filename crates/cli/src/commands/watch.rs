//! Watch command implementation.
//!
//! Treats every modification of a watched file as a save event and runs the
//! save hook on it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use console::style;
use log::debug;
use miette::{Result, miette};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use presave_engine::SaveOutcome;
use tokio::sync::mpsc;

use crate::commands::pre_save;
use crate::output;

/// Minimum interval between two save events for the same file (debounce).
const DEBOUNCE_MS: u64 = 300;

/// Directory names whose contents are never treated as saves.
const IGNORED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// Watch mode configuration.
pub struct WatchConfig {
    /// Explicit settings file, if any.
    pub settings_path: Option<PathBuf>,
    /// Files or directories to watch.
    pub paths: Vec<PathBuf>,
    /// Whether to clear screen before each event.
    pub clear_screen: bool,
}

/// Executes watch mode.
pub async fn execute(settings_path: Option<&Path>, paths: &[PathBuf], clear_screen: bool) -> Result<()> {
    let config = WatchConfig {
        settings_path: settings_path.map(Path::to_path_buf),
        paths: paths.to_vec(),
        clear_screen,
    };

    run_watch_loop(config).await
}

/// Main watch loop.
async fn run_watch_loop(config: WatchConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<PathBuf>(100);

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if !is_write(&event.kind) {
                    return;
                }
                for path in event.paths {
                    let _ = tx.blocking_send(path);
                }
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(200)),
    )
    .map_err(|e| miette!("Failed to create file watcher: {}", e))?;

    println!("\n{} Watching for saves...\n", style("👁").cyan());

    for path in &config.paths {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        watcher
            .watch(path, mode)
            .map_err(|e| miette!("Failed to watch {}: {}", path.display(), e))?;

        println!("  {} {}", style("•").dim(), style(path.display()).dim());
    }
    println!();

    let spinner = output::create_spinner("Waiting for changes...");
    let mut last_handled: HashMap<PathBuf, Instant> = HashMap::new();

    while let Some(changed_path) = rx.recv().await {
        if !is_candidate(&changed_path) {
            continue;
        }

        // Debounce rapid changes, including our own write-back.
        if let Some(last) = last_handled.get(&changed_path) {
            if last.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
                continue;
            }
        }

        spinner.finish_and_clear();

        if config.clear_screen {
            print!("\x1B[2J\x1B[1;1H");
        }

        handle_change(&config, &changed_path).await;
        record_handled(&mut last_handled, changed_path, Instant::now());

        spinner.reset();
        spinner.set_message("Waiting for changes...");
        spinner.enable_steady_tick(Duration::from_millis(100));
    }

    Ok(())
}

/// Runs the save hook for one changed file and prints the result.
async fn handle_change(config: &WatchConfig, path: &Path) {
    match pre_save::handle_save(config.settings_path.as_deref(), path, None).await {
        // Files nobody configured are noise in watch mode.
        Ok(SaveOutcome::Skipped(presave_engine::SkipReason::NotApplicable)) => {
            debug!("ignoring {}", path.display());
        }
        Ok(outcome) => pre_save::report(path, &outcome),
        Err(e) => output::error(&format!("{}: {}", path.display(), e)),
    }
}

/// Remembers when a path was handled, forgetting paths outside the debounce window.
fn record_handled(last_handled: &mut HashMap<PathBuf, Instant>, path: PathBuf, now: Instant) {
    let window = Duration::from_millis(DEBOUNCE_MS);
    last_handled.retain(|_, at| now.saturating_duration_since(*at) < window);
    last_handled.insert(path, now);
}

/// Returns true for events that follow a file being written.
fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

/// Returns true if a changed path may be a saved source file.
fn is_candidate(path: &Path) -> bool {
    if !path.is_file() || path.extension().is_none() {
        return false;
    }

    !path.components().any(|c| {
        IGNORED_DIRS
            .iter()
            .any(|dir| c.as_os_str() == std::ffi::OsStr::new(dir))
    })
}
