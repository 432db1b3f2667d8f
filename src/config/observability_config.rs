//! Observability configuration parsing from environment variables.
//!
//! This module handles the log output format and the tracing filter.

use super::{Lookup, process_env};
use anyhow::{Result, bail};
use std::str::FromStr;

/// Log line format written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityEnvConfig {
    pub log_format: LogFormat,
    /// `RUST_LOG` style directive
    pub log_filter: String,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "info".to_string(),
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };
        Ok(Self {
            log_format,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
