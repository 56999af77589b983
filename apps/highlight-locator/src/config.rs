//! Configuration management for the highlight locator

use serde::Deserialize;
use std::env;

use crate::cache::{CacheConfig, DEFAULT_CACHE_CAPACITY};
use crate::error::{LocateError, Result};
use crate::locate::DEFAULT_WINDOW_RUNS;

/// Timeout for opening a document
const OPEN_TIMEOUT_SECS: u64 = 30;
/// Timeout for decoding one page's text
const TEXT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorConfig {
    pub cache: CacheConfig,
    /// Maximum number of runs a single match may span
    pub window_runs: usize,
    pub open_timeout_secs: u64,
    pub text_timeout_secs: u64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            cache: CacheConfig {
                capacity: DEFAULT_CACHE_CAPACITY,
            },
            window_runs: DEFAULT_WINDOW_RUNS,
            open_timeout_secs: OPEN_TIMEOUT_SECS,
            text_timeout_secs: TEXT_TIMEOUT_SECS,
        }
    }
}

impl LocatorConfig {
    /// Read overrides from `LOCATOR_*` environment variables
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an
    /// error.
    pub fn from_env() -> Result<Self> {
        let defaults = LocatorConfig::default();
        Ok(LocatorConfig {
            cache: CacheConfig {
                capacity: env_or("LOCATOR_CACHE_CAPACITY", defaults.cache.capacity)?,
            },
            window_runs: env_or("LOCATOR_WINDOW_RUNS", defaults.window_runs)?,
            open_timeout_secs: env_or("LOCATOR_OPEN_TIMEOUT_SECS", defaults.open_timeout_secs)?,
            text_timeout_secs: env_or("LOCATOR_TEXT_TIMEOUT_SECS", defaults.text_timeout_secs)?,
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| LocateError::Config(format!("{} must be a non-negative integer, got '{}'", name, raw)))
}
