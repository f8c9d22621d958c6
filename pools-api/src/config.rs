//! Server configuration from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use pools_core::Dex;
use pools_services::AggregatorConfig;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 1338;

/// Static asset directory used when `STATIC_DIR` is not set
pub const DEFAULT_STATIC_DIR: &str = "dist";

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    /// Directory served at the root, must contain `404.html`
    pub static_dir: PathBuf,
    pub aggregator: AggregatorConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            aggregator: AggregatorConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the process environment
    ///
    /// Reads:
    /// - PORT: listen port
    /// - STATIC_DIR: static asset directory
    /// - POOL_SOURCES: comma-separated DEX tags (e.g. `WX,puzzle`)
    /// - POOLS_TOP_N: number of pools served
    /// - SOURCE_TIMEOUT_SECS: per-source timeout, unbounded when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(sources) = lookup("POOL_SOURCES") {
            config.aggregator.sources = parse_sources(&sources)?;
        }

        if let Some(top_n) = lookup("POOLS_TOP_N") {
            config.aggregator.top_n = parse_var("POOLS_TOP_N", &top_n)?;
        }

        if let Some(secs) = lookup("SOURCE_TIMEOUT_SECS") {
            let secs: u64 = parse_var("SOURCE_TIMEOUT_SECS", &secs)?;
            config.aggregator.source_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_sources(value: &str) -> Result<Vec<Dex>, ConfigError> {
    let sources = value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            tag.parse::<Dex>()
                .map_err(|_| ConfigError::UnknownSource(tag.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if sources.is_empty() {
        return Err(ConfigError::EmptySourceList);
    }
    Ok(sources)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("Unknown pool source: {0}")]
    UnknownSource(String),

    #[error("POOL_SOURCES cannot be empty")]
    EmptySourceList,
}
