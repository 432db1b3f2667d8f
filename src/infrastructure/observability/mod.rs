//! Log output for the binary.
//!
//! Logs go to stderr so stdout carries only command results.

use crate::config::{LogFormat, ObservabilityEnvConfig};
use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
pub fn init_tracing(config: &ObservabilityEnvConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid RUST_LOG filter: {}", config.log_filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow!("Failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = ObservabilityEnvConfig {
            log_filter: "indexfolio=[".to_string(),
            ..ObservabilityEnvConfig::default()
        };
        assert!(init_tracing(&config).is_err());
    }
}
