use std::process::ExitCode;

use rivet_cli::{is_error_silent, shell};

fn main() -> ExitCode {
    if let Err(err) = rivet_cli::run() {
        if !is_error_silent(&err) {
            shell().error(format!("{err:#}"));
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
