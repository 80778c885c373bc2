//! Runtime configuration
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. Only the API key is mandatory.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::data::spoonacular::SPOONACULAR_BASE_URL;

pub const API_KEY_VAR: &str = "SPOONACULAR_API_KEY";
pub const CACHE_DURATION_VAR: &str = "CACHE_DURATION_HOURS";
pub const API_TIMEOUT_VAR: &str = "API_TIMEOUT_SECONDS";
pub const DATA_DIR_VAR: &str = "RECIPE_DATA_DIR";
pub const BASE_URL_VAR: &str = "SPOONACULAR_BASE_URL";

/// Memory cache lifetime when none is configured
pub const DEFAULT_CACHE_HOURS: u64 = 24;

/// Longest accepted memory cache lifetime (ten years)
pub const MAX_CACHE_HOURS: u64 = 24 * 365 * 10;

/// Provider timeout when none is configured
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Storage directory when none is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SPOONACULAR_API_KEY is not set; get a key at https://spoonacular.com/food-api")]
    MissingApiKey,
}

/// Settings shared by the cache and the provider client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    /// Lifetime of memory cache entries
    pub cache_ttl: Duration,
    /// Upper bound on each provider call
    pub api_timeout: Duration,
    pub data_dir: PathBuf,
    pub base_url: String,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // a missing .env file is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let cache_hours = parse_or_default(CACHE_DURATION_VAR, lookup(CACHE_DURATION_VAR), DEFAULT_CACHE_HOURS);
        if cache_hours > MAX_CACHE_HOURS {
            warn!(hours = cache_hours, max = MAX_CACHE_HOURS, "cache duration too long, clamping");
        }
        let cache_hours = cache_hours.min(MAX_CACHE_HOURS);

        let timeout_seconds = parse_or_default(API_TIMEOUT_VAR, lookup(API_TIMEOUT_VAR), DEFAULT_TIMEOUT_SECONDS);

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| SPOONACULAR_BASE_URL.to_string());

        Ok(Config {
            api_key,
            cache_ttl: Duration::from_secs(cache_hours * 60 * 60),
            api_timeout: Duration::from_secs(timeout_seconds),
            data_dir: PathBuf::from(data_dir),
            base_url,
        })
    }
}

/// Parses a positive integer setting, warning and falling back on bad input
fn parse_or_default(name: &str, value: Option<String>, default: u64) -> u64 {
    let Some(raw) = value else {
        return default;
    };

    match raw.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => parsed,
        _ => {
            warn!(variable = name, value = %raw, default, "invalid setting, using default");
            default
        }
    }
}
