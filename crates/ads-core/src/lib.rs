//! Core library crate harvesting creative assets from ad platforms.

pub mod asset;
pub mod config;
pub mod error;
pub mod gdt;
pub mod http;
pub mod logging;
pub mod paginate;
pub mod provider;
pub mod record;
pub mod set;
pub mod transport;

pub use asset::{Asset, PageType, SubAsset, SubAssetType};
pub use config::{
    ApiSettings, ConfigLoadResult, ConfigSource, FileConfig, GdtSection, config_directory,
    config_path, load_config, load_config_from, resolve_access_token, resolve_accounts,
};
pub use error::{AdsError, TransportError};
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use paginate::{Collection, FetchWarning, Fetched, MAX_IDS_PER_REQUEST, PAGE_SIZE, Paginator};
pub use provider::{
    AssetProvider, CreativeFilter, CreativeFilters, Harvest, ProviderFactory, ProviderRegistry,
    not_deleted,
};
pub use record::{Field, Record};
pub use set::ReferenceSet;
pub use transport::{ApiVersion, Filter, Page, Resource, ResourceQuery, Transport};

/// Registry holding every built-in provider.
pub fn builtin_registry(settings: &ApiSettings) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    gdt::register(&mut registry, settings.clone());
    registry
}
