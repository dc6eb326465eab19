//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of searching
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--op`: Run with operator permissions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmdtree-console - Run commands against the demo command tree
#[derive(Parser, Debug)]
#[command(name = "cmdtree-console")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Run with operator permissions
    #[arg(long, global = true)]
    pub op: bool,

    /// Name of the session's player
    #[arg(long, global = true, default_value = "console")]
    pub player: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and run one command
    #[command(
        name = "exec",
        after_help = "\
EXAMPLES:
    cmdtree-console exec 'say hello world'
    cmdtree-console --op exec 'gamemode creative'"
    )]
    Exec {
        /// The command line to run
        input: String,
    },

    /// Report whether a command line is valid without running it
    #[command(
        name = "check",
        long_about = "Report whether a command line is valid without running it.\n\n\
            Prints 'valid' or 'invalid'. Exits with status 1 when invalid."
    )]
    Check {
        /// The command line to check
        input: String,
    },

    /// List completion candidates for a command line
    Suggest {
        /// The partial command line
        input: String,
    },

    /// Show usage for every command available to the session
    Usage,

    /// Read commands from stdin, one per line
    Repl,
}
