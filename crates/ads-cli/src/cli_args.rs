use std::path::PathBuf;

use ads_core::config::DEFAULT_PROVIDER;
use clap::{ArgAction, Parser, ValueEnum, ValueHint};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "ads-assets", version, about, long_about = None)]
pub struct Cli {
    /// Account to harvest; repeat for several accounts (defaults to GDT_ACCOUNT_ID).
    #[arg(long = "account", value_name = "ID")]
    pub accounts: Vec<String>,

    /// Marketing API access token (defaults to GDT_ACCESS_TOKEN, then a prompt).
    #[arg(long, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Ad platform to harvest from.
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// Log every API request and response body.
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Lower the default log level to debug.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Fetch only resources referenced by the account's creatives.
    #[arg(long, action = ArgAction::SetTrue)]
    pub only_adcreatives: bool,

    /// Write assets to this CSV file.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// How assets are printed to the console.
    #[arg(long, value_enum, default_value_t = OutputFormat::Log)]
    pub format: OutputFormat,

    /// Read settings from this file instead of the default config.toml.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Skip the persistent log file and log to stderr only.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_log_file: bool,
}

impl Cli {
    /// Debug-level logging is needed for `--verbose` and for the request dumps of `--debug`.
    pub fn debug_logging(&self) -> bool {
        self.verbose || self.debug
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One structured log event per asset.
    #[default]
    Log,
    /// One JSON object per line on stdout.
    Json,
}
