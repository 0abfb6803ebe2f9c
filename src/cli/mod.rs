// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;
mod commands;

pub use args::{CliArgs, Command};
pub use commands::{execute, resolve_config, resolve_today, run};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., unknown subcommand, missing arguments, or --help
/// flag), clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
