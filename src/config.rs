//! Environment configuration and build metadata.

use crate::error::{Error, Result};

/// Version string served by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release metadata resolved at compile time, constructed once at startup
/// and passed explicitly to whoever needs it.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}

/// Log-store connection settings, all from the environment.
#[derive(Debug, Clone)]
pub struct EsConfig {
    /// Hostname queried as `https://{host}/...`.
    pub host: String,
    /// Prefix of the weekly index names.
    pub index_prefix: String,
}

impl EsConfig {
    /// Reads `ES_HOST` and `ES_INDEX_PREFIX`. Both must be present and
    /// non-empty before any query is built.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: required("ES_HOST")?,
            index_prefix: required("ES_INDEX_PREFIX")?,
        })
    }
}

fn required(name: &'static str) -> Result<String> {
    match dotenvy::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(name)),
    }
}
