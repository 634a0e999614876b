//! BIDS download validator CLI.

use std::io::{self, IsTerminal};

use bids_cli::cli::{Cli, Command, ReportFormatArg};
use bids_cli::commands::{run_datasets, run_validate, run_verify_archive};
use bids_cli::logging::{LogConfig, init_logging};
use bids_cli::summary::render_report;
use bids_validate::ValidationResult;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

/// Every check passed, or a listing command succeeded.
const EXIT_OK: i32 = 0;
/// At least one check failed.
const EXIT_CHECKS_FAILED: i32 = 1;
/// Setup error: bad arguments, config, or pattern.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_ERROR);
    }
    let exit_code = match &cli.command {
        Command::Validate(args) => finish(run_validate(args), args.format),
        Command::VerifyArchive(args) => finish(run_verify_archive(args), args.format),
        Command::Datasets => match run_datasets() {
            Ok(()) => EXIT_OK,
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_ERROR
            }
        },
    };
    std::process::exit(exit_code);
}

/// Print the rendered report and map its verdict to an exit code.
fn finish(outcome: anyhow::Result<ValidationResult>, format: ReportFormatArg) -> i32 {
    let rendered = outcome.and_then(|result| Ok((render_report(&result, format)?, result)));
    match rendered {
        Ok((text, result)) => {
            println!("{text}");
            if result.all_passed() {
                EXIT_OK
            } else {
                EXIT_CHECKS_FAILED
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_ERROR
        }
    }
}

/// Logging setup from the global flags. `--log-level` beats `-v`/`-q`, and
/// either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        ..LogConfig::default()
    }
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
    .with_ansi(ansi)
}
