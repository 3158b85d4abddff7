//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. The
//! [`CommandDispatcher`] picks the command for the parsed arguments.

pub mod check;
pub mod completions;
pub mod dispatcher;

pub use check::{CheckCommand, CheckOptions};
pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
