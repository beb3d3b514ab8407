// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `rfpipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rfpipe",
    version,
    about = "Launch and supervise the random-forest data pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Name of the data file to process, resolved inside --data-dir.
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Directory containing the pipeline's Python scripts.
    #[arg(long, value_name = "DIR", default_value = "pySetup")]
    pub script_dir: String,

    /// Directory containing input data files.
    #[arg(long, value_name = "DIR", default_value = "input")]
    pub data_dir: String,

    /// Python interpreter used to run the pipeline scripts.
    #[arg(long, value_name = "BIN", default_value = "python")]
    pub python: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RFPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
