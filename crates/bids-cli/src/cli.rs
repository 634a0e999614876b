//! CLI argument definitions for the BIDS download validator.

use std::path::PathBuf;

use bids_validate::DatasetFamily;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "bids-hub-validate",
    version,
    about = "Validate a downloaded BIDS dataset before pushing it to a dataset hub",
    long_about = "Validate that a local BIDS dataset download is complete and uncorrupted.\n\n\
                  Checks expected file counts per modality, zero-byte files, and archive\n\
                  checksums. Exits with status 1 if any check fails."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log verbosity: warnings by default, -v info, -vv debug, -q errors.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Colored log output on stderr.
    #[command(flatten)]
    pub color: Color,

    /// Log level for this tool's crates; takes precedence over -v/-q.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dataset root against a built-in or custom contract.
    Validate(ValidateArgs),

    /// Verify a downloaded archive's checksum.
    VerifyArchive(VerifyArchiveArgs),

    /// List the built-in dataset families.
    Datasets,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the BIDS dataset root.
    #[arg(value_name = "BIDS_ROOT")]
    pub root: PathBuf,

    /// Built-in dataset family to validate against.
    #[arg(long = "dataset", value_enum, conflicts_with = "config")]
    pub dataset: Option<DatasetArg>,

    /// TOML file describing a custom dataset family.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Archive location, overriding the one in the dataset contract.
    ///
    /// Only used by the generic checks; the family's bespoke check is
    /// unaffected.
    #[arg(long = "archive", value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Report format printed to stdout.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct VerifyArchiveArgs {
    /// Path to the downloaded archive.
    #[arg(value_name = "ARCHIVE")]
    pub path: PathBuf,

    /// Expected MD5 digest (default: the published ISLES'24 train.7z digest).
    #[arg(long = "md5", value_name = "HEX")]
    pub md5: Option<String>,

    /// Report format printed to stdout.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,
}

/// Built-in dataset families.
#[derive(Clone, Copy, ValueEnum)]
pub enum DatasetArg {
    Arc,
    Isles24,
}

impl From<DatasetArg> for DatasetFamily {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Arc => DatasetFamily::Arc,
            DatasetArg::Isles24 => DatasetFamily::Isles24,
        }
    }
}

/// Report output choices.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ReportFormatArg {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bids-hub-validate",
            "datasets",
            "--log-level",
            "debug",
            "--log-format",
            "compact",
        ])
        .unwrap();

        assert_eq!(cli.log_level.map(LevelFilter::from), Some(LevelFilter::DEBUG));
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Compact);
        assert!(cli.log_file.is_none());
    }
}
