//! CLI argument definitions using clap
//!
//! Commands:
//! - fractal-input bind --schema <path> [--input <path>] [--defaults <path>] [--pretty]
//! - fractal-input check --schema <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fractal-input - validate, coerce, and hydrate JSON input against a schema
#[derive(Parser, Debug)]
#[command(name = "fractal-input")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind one JSON document and print the result envelope
    Bind {
        /// Path to the schema definition
        #[arg(long)]
        schema: PathBuf,

        /// Path to the input document (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to a JSON object of defaults for optional fields
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Check that a schema definition loads and builds
    Check {
        /// Path to the schema definition
        #[arg(long)]
        schema: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
