//! Command-line interface for embedgen.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`command`] - Command trait, results, and exit codes
//! - [`generate`] - The generate command

pub mod args;
pub mod command;
pub mod generate;

pub use args::{usage, Cli};
pub use command::{Command, CommandResult, EXIT_FAILURE, EXIT_INVALID_TYPE, EXIT_USAGE};
pub use generate::GenerateCommand;
