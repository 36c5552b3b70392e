//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `main`. Every variable has a default.

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `COMPARE_HOST`
    pub host: String,
    /// `COMPARE_PORT`
    pub port: u16,
    /// `FETCH_TIMEOUT_SECS`, per page
    pub fetch_timeout_secs: u64,
    /// `FETCH_USER_AGENT`
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("COMPARE_HOST").unwrap_or(defaults.host),
            port: parse_or("COMPARE_PORT", &lookup, defaults.port)?,
            fetch_timeout_secs: parse_or(
                "FETCH_TIMEOUT_SECS",
                &lookup,
                defaults.fetch_timeout_secs,
            )?,
            user_agent: lookup("FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr + std::fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        None => {
            info!("{} not set, using default {}", key, default);
            Ok(default)
        }
    }
}
