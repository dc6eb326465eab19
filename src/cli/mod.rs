//! cli
//!
//! Command-line interface layer for `cmdtree-console`.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Load configuration and build the demo registry
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and hands input text
//! to the [`crate::engine::Registry`] built by [`demo`].

pub mod args;
pub mod commands;
pub mod demo;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let ctx = commands::Context {
        registry: demo::registry(config.registry_options()),
        session: demo::ConsoleSession::new(cli.player.clone(), cli.op),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr, filtered by `RUST_LOG` or `--debug`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cmdtree=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
