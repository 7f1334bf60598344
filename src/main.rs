//! fractal-input CLI entry point
//!
//! Exit codes:
//! - 0: input bound (or schema checked) successfully
//! - 1: input rejected; the error envelope is on stdout
//! - 2: the command could not run (schema, I/O, unreadable input)

use std::io;
use std::process::ExitCode;

use fractal_input::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match cli::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}
