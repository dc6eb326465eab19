//! check command - Validate a command line without running it

use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::ui::output;

/// Print `valid` or `invalid`; exit with 1 when invalid.
pub fn check(ctx: &Context, input: &str) -> Result<ExitCode> {
    if ctx.registry.is_valid(input) {
        output::print("valid", ctx.verbosity);
        Ok(ExitCode::SUCCESS)
    } else {
        output::print("invalid", ctx.verbosity);
        Ok(ExitCode::FAILURE)
    }
}
