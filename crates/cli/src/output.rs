//! Terminal output formatting.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Prints a transient status line.
pub fn status(message: &str) {
    eprintln!("{} {}", style("●").yellow().bold(), style(message).yellow());
}

/// Dumps formatter diagnostics, framed by blank lines.
pub fn console_dump(text: &str) {
    eprintln!("\n\n{}\n\n", text);
}

/// Prints a file skipped message.
pub fn file_skipped(path: &str, reason: &str) {
    println!(
        "{} {} {}",
        style("○").dim(),
        style(path).dim(),
        style(format!("({})", reason)).dim()
    );
}

/// Prints a file formatted message.
pub fn file_formatted(path: &str, changed: bool) {
    let note = if changed { "formatted" } else { "unchanged" };
    println!("{} {} {}", style("✓").green(), path, style(format!("({})", note)).dim());
}

/// Prints a header for a section.
pub fn section_header(title: &str) {
    println!("\n{}", style(format!("── {} ──", title)).bold());
}

/// Prints a key-value pair.
pub fn key_value(key: &str, value: &str) {
    println!("    {}: {}", style(key).dim(), value);
}

/// Creates a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
