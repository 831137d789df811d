//! Armillary CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use armillary::ArmillaryError;
use armillary_cli::{Args, error_adapter::to_reportables};

/// Exit status for problems with the input document or configuration
const EXIT_INVALID_INPUT: i32 = 2;
/// Exit status for every other failure
const EXIT_FAILURE: i32 = 1;

fn init_logging(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Armillary");
}

fn report(err: &ArmillaryError) -> i32 {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }

    match err {
        ArmillaryError::Input { .. } | ArmillaryError::Config(_) => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = armillary_cli::run(&args) {
        process::exit(report(&err));
    }

    info!("Completed successfully");
}
