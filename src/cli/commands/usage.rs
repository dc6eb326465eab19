//! usage command - Show usage lines the session may use

use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::core::source::Source;
use crate::ui::output;

/// Print one usage line per executable command path.
pub fn usage(ctx: &Context) -> Result<ExitCode> {
    let lines = ctx.registry.usage_lines(&Source::new(&ctx.session));
    output::print(output::format_list(&lines, ""), ctx.verbosity);
    Ok(ExitCode::SUCCESS)
}
