//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`yurt new`, `yurt cache`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod cache;
pub mod completions;
pub mod dispatcher;
pub mod new;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
