//! Presave Engine - Formatter invocation and host wiring for presave.

mod command;
mod host;
mod listener;
mod runner;

pub use command::{FormatCommand, FormatOutcome, apply_result, failure_status, format_buffer};
pub use host::{Buffer, Host, MemoryBuffer};
pub use listener::{PreSaveListener, SaveOutcome, SkipReason, should_format_on_save};
pub use runner::FormatterRunner;
