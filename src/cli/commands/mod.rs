//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds a [`Source`](crate::core::source::Source) around the session
//! 2. Calls the registry
//! 3. Formats and displays output
//!
//! Handlers report failures of the input itself through the exit code and
//! return `Err` only for failures of the console.

mod check;
mod exec;
mod repl;
mod suggest;
mod usage;

pub use check::check;
pub use exec::{exec, run_line};
pub use repl::repl;
pub use suggest::suggest;
pub use usage::usage;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::Command;
use crate::cli::demo::ConsoleSession;
use crate::core::config::Config;
use crate::engine::Registry;
use crate::ui::output::{self, Verbosity};

/// Everything a handler needs.
#[derive(Debug)]
pub struct Context {
    pub registry: Registry,
    pub session: ConsoleSession,
    pub config: Config,
    pub verbosity: Verbosity,
}

impl Context {
    /// Print and clear the output the session's commands produced.
    pub fn flush_output(&self) {
        for line in self.session.take_output() {
            output::print(line, self.verbosity);
        }
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Exec { input } => exec::exec(ctx, &input),
        Command::Check { input } => check::check(ctx, &input),
        Command::Suggest { input } => suggest::suggest(ctx, &input),
        Command::Usage => usage::usage(ctx),
        Command::Repl => repl::repl(ctx, std::io::stdin().lock()),
    }
}
