use std::fs;

use ads_cli::{OutputFormat, RunOptions, harvest_accounts};
use ads_core::{
    AdsError, Asset, AssetProvider, CreativeFilter, Harvest, PageType, ProviderRegistry, SubAsset,
};
use async_trait::async_trait;
use tempfile::tempdir;

/// Provider returning one landing page per account.
struct FixedProvider {
    account_id: String,
}

#[async_trait]
impl AssetProvider for FixedProvider {
    async fn assets(&self) -> Result<Harvest, AdsError> {
        if self.account_id == "666" {
            return Err(AdsError::InvalidAccountId(self.account_id.clone()));
        }
        Ok(Harvest {
            version: None,
            assets: vec![Asset {
                account_id: self.account_id.clone(),
                asset_id: format!("page-{}", self.account_id),
                page_type: PageType::PageUrl,
                sub_assets: vec![SubAsset::page_url(format!(
                    "https://landing/{}",
                    self.account_id
                ))],
                version: "v2".into(),
                ..Asset::default()
            }],
            warnings: Vec::new(),
        })
    }

    fn set_creative_filter(&mut self, _filter: CreativeFilter) {}

    fn set_only_adcreatives(&mut self, _on: bool) {}
}

fn registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register("FIXED", |account_id: &str, _: &str, _: bool| {
        Ok(Box::new(FixedProvider {
            account_id: account_id.to_string(),
        }) as Box<dyn AssetProvider>)
    });
    registry
}

fn options(accounts: &[&str]) -> RunOptions {
    RunOptions {
        provider: "FIXED".into(),
        accounts: accounts.iter().map(|a| a.to_string()).collect(),
        access_token: "token".into(),
        debug: false,
        only_adcreatives: false,
        format: OutputFormat::Json,
        output: None,
    }
}

#[tokio::test]
async fn test_json_lines_per_asset() {
    let mut console = Vec::new();
    let summary = harvest_accounts(&registry(), &options(&["1", "2"]), &mut console)
        .await
        .unwrap();
    assert_eq!(summary.accounts, 2);
    assert_eq!(summary.assets, 2);

    let output = String::from_utf8(console).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["asset_id"], "page-1");
    assert_eq!(lines[1]["page_type"], "PageUrl");
    assert_eq!(lines[1]["sub_assets"][0]["type"], "PageUrl");
}

#[tokio::test]
async fn test_csv_header_written_once_across_accounts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assets.csv");
    let mut options = options(&["1", "2"]);
    options.format = OutputFormat::Log;
    options.output = Some(path.clone());

    let mut console = Vec::new();
    harvest_accounts(&registry(), &options, &mut console)
        .await
        .unwrap();
    assert!(console.is_empty(), "Log format should not write to stdout");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("AccountID,"));
    assert_eq!(lines[2], "2,,page-2,,PageUrl,,,PageUrl:https://landing/2,,v2");
}

#[tokio::test]
async fn test_unknown_provider_aborts() {
    let mut options = options(&["1"]);
    options.provider = "NOPE".into();

    let err = harvest_accounts(&registry(), &options, &mut Vec::new())
        .await
        .unwrap_err();
    let root = err.downcast_ref::<AdsError>().unwrap();
    assert!(matches!(root, AdsError::ProviderNotFound(name) if name == "NOPE"));
}

#[tokio::test]
async fn test_fatal_account_error_stops_the_run() {
    let mut console = Vec::new();
    let err = harvest_accounts(&registry(), &options(&["1", "666", "3"]), &mut console)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("666"));

    let output = String::from_utf8(console).unwrap();
    assert_eq!(output.lines().count(), 1, "Accounts after the failure are skipped");
}
