//! Configuration module for indexfolio.
//!
//! Settings are read from environment variables (a `.env` file is loaded by
//! the binary), grouped by concern: Aggregation, Signals, Indicators and
//! Observability.

mod aggregation_config;
mod indicator_env_config;
mod observability_config;
mod signal_config;

pub use aggregation_config::AggregationEnvConfig;
pub use indicator_env_config::IndicatorEnvConfig;
pub use observability_config::{LogFormat, ObservabilityEnvConfig};
pub use signal_config::SignalEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Source of raw configuration values, keyed by variable name
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Parses `key` from `lookup`, falling back to `default` when unset.
pub(crate) fn parse_or<T>(lookup: Lookup<'_>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub aggregation: AggregationEnvConfig,
    pub signals: SignalEnvConfig,
    pub indicators: IndicatorEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let config = Self {
            aggregation: AggregationEnvConfig::from_lookup(lookup)
                .context("Failed to load aggregation config")?,
            signals: SignalEnvConfig::from_lookup(lookup)
                .context("Failed to load signal config")?,
            indicators: IndicatorEnvConfig::from_lookup(lookup)
                .context("Failed to load indicator config")?,
            observability: ObservabilityEnvConfig::from_lookup(lookup)
                .context("Failed to load observability config")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.aggregation.validate()?;
        self.signals
            .to_policy()
            .validate()
            .context("Invalid signal config")?;
        self.indicators
            .to_indicator_config()
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid indicator config")?;
        Ok(())
    }
}
