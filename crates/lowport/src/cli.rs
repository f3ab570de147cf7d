//! Clap derive structures for the `lowport` CLI.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use lowport_config::DEFAULT_ENV_FILE;

/// Fixed name of the export written to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "low_usage_ports.csv";

/// lowport -- switch port usage report for a Meraki organization
#[derive(Debug, Parser)]
#[command(
    name = "lowport",
    version,
    about = "Report Meraki switch port usage and export low-usage ports to CSV",
    long_about = "Lists every switch (MS model) in a Meraki organization, prints a\n\
        table of per-port link status and 30-day usage for each one, then\n\
        writes the ports whose total usage is below the threshold to CSV.\n\n\
        Reads API_KEY, ORG_ID, BASE_URL and USAGE_THRESHOLD_KB from the\n\
        environment or from a local .env file."
)]
pub struct Cli {
    /// Dotenv file read underneath the process environment
    #[arg(long, env = "LOWPORT_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Usage threshold in KB (overrides USAGE_THRESHOLD_KB)
    #[arg(long, short = 't', value_name = "KB", allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// CSV file for low-usage ports, overwritten on every run
    #[arg(
        long,
        short = 'o',
        env = "LOWPORT_OUTPUT_FILE",
        default_value = DEFAULT_OUTPUT_FILE
    )]
    pub output_file: PathBuf,

    /// Per-request timeout in seconds (requests never time out when unset)
    #[arg(long, env = "LOWPORT_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Skip the console report and the success line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
