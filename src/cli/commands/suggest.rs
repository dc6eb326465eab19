//! suggest command - List completion candidates

use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::core::source::Source;
use crate::ui::output;

/// Print one suggestion per line.
pub fn suggest(ctx: &Context, input: &str) -> Result<ExitCode> {
    let suggestions = ctx.registry.suggest(&Source::new(&ctx.session), input);
    if !suggestions.is_empty() {
        output::print(output::format_list(&suggestions, ""), ctx.verbosity);
    }
    Ok(ExitCode::SUCCESS)
}
