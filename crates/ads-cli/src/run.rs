//! Harvest loop over the requested accounts.

use std::io::Write;
use std::path::PathBuf;

use ads_core::{Asset, ProviderRegistry};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli_args::{Cli, OutputFormat};
use crate::export::AssetCsv;

/// Everything a harvest run needs once flags, environment and config are merged.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub provider: String,
    pub accounts: Vec<String>,
    pub access_token: String,
    pub debug: bool,
    pub only_adcreatives: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl RunOptions {
    pub fn from_cli(cli: &Cli, accounts: Vec<String>, access_token: String) -> Self {
        Self {
            provider: cli.provider.clone(),
            accounts,
            access_token,
            debug: cli.debug,
            only_adcreatives: cli.only_adcreatives,
            format: cli.format,
            output: cli.output.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accounts: usize,
    pub assets: usize,
    pub warnings: usize,
}

/// Harvests every account in order. The first fatal error aborts the run.
pub async fn harvest_accounts<W: Write>(
    registry: &ProviderRegistry,
    options: &RunOptions,
    console: &mut W,
) -> Result<RunSummary> {
    let mut csv = match &options.output {
        Some(path) => Some(AssetCsv::create(path)?),
        None => None,
    };
    let mut summary = RunSummary::default();

    for account_id in &options.accounts {
        let mut provider = registry
            .open(
                &options.provider,
                account_id,
                &options.access_token,
                options.debug,
            )
            .with_context(|| format!("Failed to open {} for account {account_id}", options.provider))?;
        provider.set_only_adcreatives(options.only_adcreatives);

        let harvest = provider
            .assets()
            .await
            .with_context(|| format!("Failed to harvest account {account_id}"))?;

        for warning in &harvest.warnings {
            warn!(
                account_id = %account_id,
                version = %warning.version,
                resource = %warning.resource,
                page = warning.page,
                error = %warning.message,
                "assets may be incomplete"
            );
        }

        for asset in &harvest.assets {
            print_asset(options.format, asset, console)?;
            if let Some(csv) = csv.as_mut() {
                csv.write(asset)?;
            }
        }

        info!(
            account_id = %account_id,
            version = harvest.version.map(|v| v.label()).unwrap_or("none"),
            assets = harvest.assets.len(),
            complete = harvest.is_complete(),
            "account harvested"
        );
        summary.accounts += 1;
        summary.assets += harvest.assets.len();
        summary.warnings += harvest.warnings.len();
    }

    if let Some(csv) = csv {
        let rows = csv.rows();
        csv.finish()?;
        if let Some(path) = &options.output {
            info!(path = %path.display(), rows, "CSV export written");
        }
    }

    Ok(summary)
}

fn print_asset<W: Write>(format: OutputFormat, asset: &Asset, console: &mut W) -> Result<()> {
    match format {
        OutputFormat::Log => {
            info!(
                account_id = %asset.account_id,
                asset_id = %asset.asset_id,
                name = %asset.name,
                page_type = %asset.page_type,
                sub_type = %asset.sub_type,
                url = %asset.primary_url(),
                version = %asset.version,
                "asset"
            );
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *console, asset).context("Failed to encode asset")?;
            writeln!(console).context("Failed to write asset")?;
        }
    }
    Ok(())
}
