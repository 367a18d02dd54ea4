//! CLI argument parsing for compose-file.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load and validate compose files (format version 2.1).
///
/// A file is parsed, checked against the bundled schema, and decoded into
/// typed services, networks, and volumes.
#[derive(Parser, Debug)]
#[command(name = "compose-file")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for compose-file.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a compose file and report what it defines.
    ///
    /// Runs every loading stage (parse, version gate, schema, decode) and
    /// prints a summary, or the whole decoded config with --json.
    Check(CheckArgs),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the compose file.
    pub file: PathBuf,

    /// Directory relative volume sources are resolved against.
    ///
    /// Defaults to the directory containing the file.
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// Print the decoded config as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
