use std::process::ExitCode;

use langbridge::cli::{self, UsageError};
use langbridge::ui::output;

fn main() -> ExitCode {
    let err = match cli::run() {
        Ok(()) => return ExitCode::SUCCESS,
        Err(err) => err,
    };

    match err.downcast_ref::<UsageError>() {
        Some(usage) => {
            output::usage(usage.render());
            ExitCode::from(2)
        }
        None => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
