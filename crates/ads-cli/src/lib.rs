//! Command-line front end for the asset harvester.

pub mod cli_args;
pub mod export;
pub mod run;

pub use cli_args::{Cli, OutputFormat};
pub use export::AssetCsv;
pub use run::{RunOptions, RunSummary, harvest_accounts};
