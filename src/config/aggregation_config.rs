//! Index aggregation settings.

use super::{Lookup, parse_or, process_env};
use anyhow::{Result, bail};

/// Securities whose merged weight falls below this percentage are dropped
pub const DEFAULT_MIN_WEIGHT_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationEnvConfig {
    pub min_weight_threshold: f64,
}

impl Default for AggregationEnvConfig {
    fn default() -> Self {
        Self {
            min_weight_threshold: DEFAULT_MIN_WEIGHT_THRESHOLD,
        }
    }
}

impl AggregationEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            min_weight_threshold: parse_or(
                lookup,
                "MIN_WEIGHT_THRESHOLD",
                DEFAULT_MIN_WEIGHT_THRESHOLD,
            )?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_weight_threshold.is_finite() || !(0.0..=100.0).contains(&self.min_weight_threshold)
        {
            bail!(
                "MIN_WEIGHT_THRESHOLD must be within 0..=100, got {}",
                self.min_weight_threshold
            );
        }
        Ok(())
    }
}
