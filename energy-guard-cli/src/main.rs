//! energy-guard binary
//!
//! Validates energy-statistics files and exits 0 when the data passes, 1 when
//! it fails and 2 when the inputs could not be validated at all.

use clap::Parser;
use energy_guard::logging::setup::init_logging;
use energy_guard_cli::{run, Cli};
use std::process::ExitCode;
use tracing::error;

const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.logging_config()) {
        eprintln!("warning: logging disabled: {e}");
    }

    match run(&cli) {
        Ok(output) => {
            print!("{}", output.rendered);
            ExitCode::from(output.exit_code() as u8)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Validation could not run");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
