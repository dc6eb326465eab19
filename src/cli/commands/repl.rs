//! repl command - Read and run commands line by line

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing::debug;

use super::{run_line, Context};
use crate::ui::output::{self, Verbosity};

/// Run each line of `input` until end of input or `exit`.
///
/// Exits with 1 if any line failed.
pub fn repl(ctx: &Context, input: impl BufRead) -> Result<ExitCode> {
    let mut failures = 0_usize;

    prompt(ctx)?;
    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();

        match trimmed {
            "" => {}
            "exit" | "quit" => break,
            _ => {
                if !run_line(ctx, trimmed) {
                    failures += 1;
                }
            }
        }
        prompt(ctx)?;
    }

    debug!(failures, "repl finished");
    if failures == 0 {
        return Ok(ExitCode::SUCCESS);
    }
    let plural = if failures == 1 { "" } else { "s" };
    output::warn(format!("{failures} line{plural} failed"), ctx.verbosity);
    Ok(ExitCode::FAILURE)
}

fn prompt(ctx: &Context) -> Result<()> {
    if ctx.verbosity == Verbosity::Quiet {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", ctx.config.prompt())?;
    stdout.flush()?;
    Ok(())
}
