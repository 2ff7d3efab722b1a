//! External command execution.
//!
//! Yurt only shells out for one thing: asking the local package manager
//! for an npm tarball URL. Running the package manager's own CLI (instead
//! of talking to the registry directly) inherits whatever auth, proxy, and
//! registry configuration the user already has.

pub mod command;

pub use command::{run_captured, CommandResult};

/// Detect whether we are running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var_os("CI").is_some()
}
