mod check;
mod cli;
mod error;
mod progress;
mod ui;

use clap::Parser;
use cli::Cli;
use std::process;

/// Exit status when the run's error rate is above the limit
const EXIT_VALIDATION_FAILED: i32 = 1;
/// Exit status when the check itself could not be completed
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();

    match check::execute(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_VALIDATION_FAILED),
        Err(err) => {
            ui::error_message(&err.user_message());
            process::exit(EXIT_ERROR);
        }
    }
}
