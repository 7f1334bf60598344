//! CLI module for fractal-input
//!
//! Provides command-line interface for:
//! - bind: bind one JSON document against a schema definition
//! - check: verify that a schema definition builds

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{bind, bind_envelope, check, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, read_document, write_envelope, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<bool> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
