use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::asset::Asset;
use crate::error::AdsError;
use crate::paginate::FetchWarning;
use crate::record::Record;
use crate::transport::ApiVersion;

/// Predicate deciding whether a creative takes part in a harvest.
pub type CreativeFilter = Box<dyn Fn(&Record) -> bool + Send + Sync>;

/// Builds a provider for `(account_id, credential, debug)`.
pub type ProviderFactory =
    Box<dyn Fn(&str, &str, bool) -> Result<Box<dyn AssetProvider>, AdsError> + Send + Sync>;

/// Outcome of one [`AssetProvider::assets`] call.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Version whose creatives produced the assets; `None` when neither had any.
    pub version: Option<ApiVersion>,
    pub assets: Vec<Asset>,
    /// Page failures that were tolerated while resolving references.
    pub warnings: Vec<FetchWarning>,
}

impl Harvest {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// An ad platform able to produce the creative assets of one account.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn assets(&self) -> Result<Harvest, AdsError>;

    /// Adds a creative predicate. A creative is kept when any predicate accepts it.
    fn set_creative_filter(&mut self, filter: CreativeFilter);

    /// When on, only resources referenced by processed creatives are fetched.
    fn set_only_adcreatives(&mut self, on: bool);
}

/// Ordered list of creative predicates combined with logical OR.
#[derive(Default)]
pub struct CreativeFilters(Vec<CreativeFilter>);

impl CreativeFilters {
    pub fn push(&mut self, filter: CreativeFilter) {
        self.0.push(filter);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn accepts(&self, creative: &Record) -> bool {
        self.0.iter().any(|filter| filter(creative))
    }

    /// Creatives accepted by at least one predicate, each at most once.
    pub fn select<'r>(&self, creatives: &'r [Record]) -> Vec<&'r Record> {
        creatives
            .iter()
            .filter(|creative| self.accepts(creative))
            .collect()
    }
}

impl fmt::Debug for CreativeFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreativeFilters")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Default predicate: skip creatives flagged `is_deleted`.
pub fn not_deleted() -> CreativeFilter {
    Box::new(|creative: &Record| !creative.get("is_deleted").bool())
}

/// Name-keyed provider factories, built once at startup and passed down.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str, &str, bool) -> Result<Box<dyn AssetProvider>, AdsError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn open(
        &self,
        name: &str,
        account_id: &str,
        credential: &str,
        debug: bool,
    ) -> Result<Box<dyn AssetProvider>, AdsError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| AdsError::ProviderNotFound(name.to_string()))?;
        factory(account_id, credential, debug)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
