//! Tile Forge Application Library
//!
//! Configuration, logging, progress reporting and output for the
//! `tile-forge` command-line generator.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod setup;

pub use config::{AppConfig, Cli};
pub use error::AppError;

use std::process::ExitCode;

/// Exit code used when generation ran but left cells unresolved.
pub const EXIT_INCOMPLETE: u8 = 2;

/// Resolves the configuration, initialises logging and runs a generation.
///
/// Returns success when the grid is fully collapsed and [`EXIT_INCOMPLETE`]
/// when a partial grid was written.
pub fn run(cli: &Cli) -> Result<ExitCode, AppError> {
    let config = AppConfig::load(cli)?;
    logging::init_logger(config.log_level);
    log::debug!("Loaded Config: {config:?}");

    let generation = setup::execution::run_standard_mode(&config)?;
    if generation.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INCOMPLETE))
    }
}

/// Parses the process arguments and runs the application.
pub fn main() -> ExitCode {
    use clap::Parser;

    match run(&Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
