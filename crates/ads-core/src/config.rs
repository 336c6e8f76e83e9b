use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::AdsError;

const CONFIG_DIR_NAME: &str = "ads-assets";
const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_PROVIDER: &str = "GDT";
pub const DEFAULT_LEGACY_BASE_URL: &str = "https://api.e.qq.com/v1.1/";
pub const DEFAULT_DYNAMIC_BASE_URL: &str = "https://api.e.qq.com/v3.0/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_ACCESS_TOKEN: &str = "GDT_ACCESS_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "GDT_ACCOUNT_ID";
pub const ENV_LEGACY_BASE_URL: &str = "GDT_API_BASE_V2";
pub const ENV_DYNAMIC_BASE_URL: &str = "GDT_API_BASE_V3";
pub const ENV_TIMEOUT_SECS: &str = "GDT_TIMEOUT_SECS";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub gdt: GdtSection,
}

/// `[gdt]` table of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GdtSection {
    #[serde(default)]
    pub legacy_base_url: Option<String>,
    #[serde(default)]
    pub dynamic_base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub accounts: Vec<String>,
}

/// Endpoint settings shared by every provider instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub legacy_base_url: String,
    pub dynamic_base_url: String,
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            legacy_base_url: DEFAULT_LEGACY_BASE_URL.to_string(),
            dynamic_base_url: DEFAULT_DYNAMIC_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiSettings {
    /// Layers process environment over the file section over defaults.
    pub fn from_env(section: &GdtSection) -> Result<Self, AdsError> {
        Self::resolve(section, process_env)
    }

    pub fn resolve<F>(section: &GdtSection, lookup: F) -> Result<Self, AdsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let legacy_base_url = non_blank(lookup(ENV_LEGACY_BASE_URL))
            .or_else(|| section.legacy_base_url.clone())
            .unwrap_or_else(|| DEFAULT_LEGACY_BASE_URL.to_string());
        let dynamic_base_url = non_blank(lookup(ENV_DYNAMIC_BASE_URL))
            .or_else(|| section.dynamic_base_url.clone())
            .unwrap_or_else(|| DEFAULT_DYNAMIC_BASE_URL.to_string());

        let file_timeout = section.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let timeout_secs = parse_env(&lookup, ENV_TIMEOUT_SECS, file_timeout, |s| {
            s.parse::<u64>()
        })?;
        if timeout_secs == 0 {
            return Err(AdsError::config(format!(
                "{ENV_TIMEOUT_SECS} must be greater than zero"
            )));
        }

        Ok(Self {
            legacy_base_url: with_trailing_slash(legacy_base_url),
            dynamic_base_url: with_trailing_slash(dynamic_base_url),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Picks the access token: explicit value, then environment, then file.
pub fn resolve_access_token<F>(explicit: Option<&str>, section: &GdtSection, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(explicit.map(str::to_string))
        .or_else(|| non_blank(lookup(ENV_ACCESS_TOKEN)))
        .or_else(|| non_blank(section.access_token.clone()))
}

/// Picks the account list: explicit values, then environment, then file.
pub fn resolve_accounts<F>(explicit: &[String], section: &GdtSection, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit: Vec<String> = explicit
        .iter()
        .map(|account| account.trim().to_string())
        .filter(|account| !account.is_empty())
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }

    if let Some(account) = non_blank(lookup(ENV_ACCOUNT_ID)) {
        return vec![account];
    }

    section
        .accounts
        .iter()
        .map(|account| account.trim().to_string())
        .filter(|account| !account.is_empty())
        .collect()
}

pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Reads `path`, falling back to defaults with a warning when it is unusable.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if !path.exists() {
        return ConfigLoadResult {
            config: FileConfig::default(),
            warnings,
            source: ConfigSource::Default,
        };
    }

    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
            Ok(config) => ConfigLoadResult {
                config,
                warnings,
                source: ConfigSource::File,
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to parse {}: {err}. Using defaults.",
                    path.display()
                ));
                ConfigLoadResult {
                    config: FileConfig::default(),
                    warnings,
                    source: ConfigSource::Default,
                }
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read {}: {err}. Using defaults.",
                path.display()
            ));
            ConfigLoadResult {
                config: FileConfig::default(),
                warnings,
                source: ConfigSource::Default,
            }
        }
    }
}

fn parse_env<T, F, P, E>(lookup: &F, var: &str, default: T, mut parser: P) -> Result<T, AdsError>
where
    F: Fn(&str) -> Option<String>,
    P: FnMut(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    match non_blank(lookup(var)) {
        Some(value) => parser(value.trim())
            .map_err(|err| AdsError::Config(format!("invalid value for {}: {}", var, err))),
        None => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
