//! cmdtree-console entry point.

use std::process::ExitCode;

use cmdtree::ui::output;

fn main() -> ExitCode {
    match cmdtree::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
