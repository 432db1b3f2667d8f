//! Signal voting settings.
//!
//! Maps `SIGNAL_WEIGHT_*`, `STRONG_TREND_ADX` and `STRONG_TALLY_THRESHOLD`
//! onto a [`SignalPolicy`].

use super::{Lookup, parse_or, process_env};
use crate::domain::signals::{SignalPolicy, VoteWeights};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalEnvConfig {
    pub rsi_weight: u32,
    pub macd_weight: u32,
    pub bb_weight: u32,
    pub ema_weight: u32,
    pub strong_trend_adx: f64,
    pub strong_tally_threshold: u32,
}

impl Default for SignalEnvConfig {
    fn default() -> Self {
        let policy = SignalPolicy::default();
        Self {
            rsi_weight: policy.weights.rsi,
            macd_weight: policy.weights.macd,
            bb_weight: policy.weights.bb,
            ema_weight: policy.weights.ema,
            strong_trend_adx: policy.strong_trend_adx,
            strong_tally_threshold: policy.strong_tally_threshold,
        }
    }
}

impl SignalEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            rsi_weight: parse_or(lookup, "SIGNAL_WEIGHT_RSI", defaults.rsi_weight)?,
            macd_weight: parse_or(lookup, "SIGNAL_WEIGHT_MACD", defaults.macd_weight)?,
            bb_weight: parse_or(lookup, "SIGNAL_WEIGHT_BB", defaults.bb_weight)?,
            ema_weight: parse_or(lookup, "SIGNAL_WEIGHT_EMA", defaults.ema_weight)?,
            strong_trend_adx: parse_or(lookup, "STRONG_TREND_ADX", defaults.strong_trend_adx)?,
            strong_tally_threshold: parse_or(
                lookup,
                "STRONG_TALLY_THRESHOLD",
                defaults.strong_tally_threshold,
            )?,
        })
    }

    pub fn to_policy(&self) -> SignalPolicy {
        SignalPolicy {
            weights: VoteWeights {
                rsi: self.rsi_weight,
                macd: self.macd_weight,
                bb: self.bb_weight,
                ema: self.ema_weight,
            },
            strong_trend_adx: self.strong_trend_adx,
            strong_tally_threshold: self.strong_tally_threshold,
        }
    }
}
