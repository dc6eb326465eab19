//! exec command - Parse and run one command line

use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::cli::demo;
use crate::core::source::Source;
use crate::ui::output;

/// Parse and run one command line.
pub fn exec(ctx: &Context, input: &str) -> Result<ExitCode> {
    Ok(if run_line(ctx, input) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `input` against the session, printing its output or the error.
///
/// Returns true if the command ran.
pub fn run_line(ctx: &Context, input: &str) -> bool {
    let source = Source::new(&ctx.session);

    if let Some(node) = demo::denied_node(&ctx.registry, &source, input) {
        output::error(format!("permission denied for '{node}'"));
        return false;
    }

    let result = ctx.registry.parse_str(&source, input);
    ctx.flush_output();

    match result {
        Ok(()) => true,
        Err(err) => {
            output::error(output::format_command_error(&err, input));
            if ctx.config.show_suggestions() {
                let suggestions = ctx.registry.suggest(&source, input);
                if !suggestions.is_empty() {
                    output::print(
                        format!("suggestions:\n{}", output::format_list(&suggestions, "  ")),
                        ctx.verbosity,
                    );
                }
            }
            false
        }
    }
}
