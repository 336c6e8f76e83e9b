use std::io;
use std::process::ExitCode;

use ads_cli::{Cli, RunOptions, harvest_accounts};
use ads_core::config::process_env;
use ads_core::{
    ApiSettings, LoggingDestination, builtin_registry, init_logging, load_config,
    load_config_from, resolve_access_token, resolve_accounts,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use rpassword::prompt_password;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let destination = if cli.no_log_file {
        LoggingDestination::StderrOnly
    } else {
        LoggingDestination::FileAndStderr
    };
    if let Err(err) = init_logging(destination, cli.debug_logging()) {
        eprintln!("Warning: failed to initialise logging: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "harvest aborted");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let load = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    for warning in &load.warnings {
        warn!(%warning, "configuration warning");
    }
    let section = &load.config.gdt;

    let settings = ApiSettings::from_env(section)?;
    let accounts = resolve_accounts(&cli.accounts, section, process_env);
    if accounts.is_empty() {
        bail!("No account given: pass --account, set GDT_ACCOUNT_ID or list accounts in config.toml");
    }

    let access_token = match resolve_access_token(cli.access_token.as_deref(), section, process_env)
    {
        Some(token) => token,
        None => prompt_password("GDT access token: ").context("Failed to read access token")?,
    };
    if access_token.trim().is_empty() {
        bail!("An access token is required");
    }

    let registry = builtin_registry(&settings);
    let options = RunOptions::from_cli(&cli, accounts, access_token);
    info!(
        provider = %options.provider,
        accounts = options.accounts.len(),
        only_adcreatives = options.only_adcreatives,
        source = ?load.source,
        "starting harvest"
    );

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let summary = harvest_accounts(&registry, &options, &mut console).await?;
    info!(
        accounts = summary.accounts,
        assets = summary.assets,
        warnings = summary.warnings,
        "harvest finished"
    );
    Ok(())
}
