//! CLI command implementations.

pub mod check;
pub mod format;
pub mod init;
pub mod list;
pub mod pre_save;
pub mod validate;
pub mod watch;
