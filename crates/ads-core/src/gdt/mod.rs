//! Tencent GDT (Guangdiantong) asset provider.
//!
//! An account is harvested from whichever creative generation it uses. Legacy
//! creatives are probed first; an account with none falls back to dynamic
//! creatives. Only the probe of each generation is fatal, everything after
//! it is collected best-effort.

mod dynamic;
mod fields;
mod legacy;
mod sink;

use async_trait::async_trait;
use tracing::info;

use crate::config::ApiSettings;
use crate::error::AdsError;
use crate::http::HttpTransport;
use crate::paginate::Paginator;
use crate::provider::{
    AssetProvider, CreativeFilter, CreativeFilters, Harvest, ProviderRegistry, not_deleted,
};
use crate::set::ReferenceSet;
use crate::transport::{Page, Transport};

pub const PROVIDER_NAME: &str = "GDT";

/// Outcome of probing the first page of legacy creatives.
#[derive(Debug)]
enum Fallback {
    Legacy(Page),
    Dynamic,
}

impl Fallback {
    fn from_probe(first: Page) -> Self {
        if first.total == 0 {
            Self::Dynamic
        } else {
            Self::Legacy(first)
        }
    }
}

pub struct GdtProvider {
    account_id: i64,
    transport: Box<dyn Transport>,
    filters: CreativeFilters,
    only_adcreatives: bool,
}

impl GdtProvider {
    /// Builds a provider over any transport. Deleted creatives are skipped by default.
    pub fn new(account_id: &str, transport: Box<dyn Transport>) -> Result<Self, AdsError> {
        let account_id = parse_account_id(account_id)?;
        let mut filters = CreativeFilters::default();
        filters.push(not_deleted());

        Ok(Self {
            account_id,
            transport,
            filters,
            only_adcreatives: false,
        })
    }

    /// Builds a provider talking HTTP to the marketing API.
    pub fn connect(
        settings: &ApiSettings,
        account_id: &str,
        access_token: &str,
        debug: bool,
    ) -> Result<Self, AdsError> {
        let id = parse_account_id(account_id)?;
        let transport = HttpTransport::new(settings.clone(), id, access_token, debug)?;
        Self::new(account_id, Box::new(transport))
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }
}

#[async_trait]
impl AssetProvider for GdtProvider {
    async fn assets(&self) -> Result<Harvest, AdsError> {
        let paginator = Paginator::new(self.transport.as_ref());

        let probe = paginator.first_page(&legacy::creatives()).await?;
        match Fallback::from_probe(probe) {
            Fallback::Legacy(first) => {
                info!(
                    account_id = self.account_id,
                    total = first.total,
                    "harvesting legacy creatives"
                );
                Ok(legacy::harvest(
                    &paginator,
                    self.account_id,
                    first,
                    &self.filters,
                    self.only_adcreatives,
                )
                .await)
            }
            Fallback::Dynamic => {
                info!(
                    account_id = self.account_id,
                    "no legacy creatives; falling back to dynamic creatives"
                );
                let first = paginator.first_page(&dynamic::creatives()).await?;
                if first.total == 0 {
                    info!(account_id = self.account_id, "account has no creatives");
                    return Ok(Harvest::default());
                }
                Ok(dynamic::harvest(
                    &paginator,
                    self.account_id,
                    first,
                    &self.filters,
                    self.only_adcreatives,
                )
                .await)
            }
        }
    }

    fn set_creative_filter(&mut self, filter: CreativeFilter) {
        self.filters.push(filter);
    }

    fn set_only_adcreatives(&mut self, on: bool) {
        self.only_adcreatives = on;
    }
}

/// Registers the HTTP-backed GDT provider under [`PROVIDER_NAME`].
pub fn register(registry: &mut ProviderRegistry, settings: ApiSettings) {
    registry.register(
        PROVIDER_NAME,
        move |account_id: &str, access_token: &str, debug: bool| {
            let provider = GdtProvider::connect(&settings, account_id, access_token, debug)?;
            Ok(Box::new(provider) as Box<dyn AssetProvider>)
        },
    );
}

fn parse_account_id(account_id: &str) -> Result<i64, AdsError> {
    account_id
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AdsError::InvalidAccountId(account_id.to_string()))
}

/// Ids to filter by: the referenced ones, or none (the whole collection).
fn scope(only_adcreatives: bool, ids: &ReferenceSet<String>) -> Vec<String> {
    if only_adcreatives { ids.to_vec() } else { Vec::new() }
}
