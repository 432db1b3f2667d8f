//! Indicator lookback settings.

use super::{Lookup, parse_or, process_env};
use crate::domain::signals::IndicatorConfig;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorEnvConfig {
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub ema_period: usize,
    pub adx_period: usize,
}

impl Default for IndicatorEnvConfig {
    fn default() -> Self {
        let config = IndicatorConfig::default();
        Self {
            rsi_period: config.rsi_period,
            macd_fast_period: config.macd_fast_period,
            macd_slow_period: config.macd_slow_period,
            macd_signal_period: config.macd_signal_period,
            bb_period: config.bb_period,
            bb_std_dev: config.bb_std_dev,
            ema_period: config.ema_period,
            adx_period: config.adx_period,
        }
    }
}

impl IndicatorEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            rsi_period: parse_or(lookup, "RSI_PERIOD", defaults.rsi_period)?,
            macd_fast_period: parse_or(lookup, "MACD_FAST_PERIOD", defaults.macd_fast_period)?,
            macd_slow_period: parse_or(lookup, "MACD_SLOW_PERIOD", defaults.macd_slow_period)?,
            macd_signal_period: parse_or(
                lookup,
                "MACD_SIGNAL_PERIOD",
                defaults.macd_signal_period,
            )?,
            bb_period: parse_or(lookup, "BB_PERIOD", defaults.bb_period)?,
            bb_std_dev: parse_or(lookup, "BB_STD_DEV", defaults.bb_std_dev)?,
            ema_period: parse_or(lookup, "EMA_PERIOD", defaults.ema_period)?,
            adx_period: parse_or(lookup, "ADX_PERIOD", defaults.adx_period)?,
        })
    }

    pub fn to_indicator_config(&self) -> IndicatorConfig {
        IndicatorConfig {
            rsi_period: self.rsi_period,
            macd_fast_period: self.macd_fast_period,
            macd_slow_period: self.macd_slow_period,
            macd_signal_period: self.macd_signal_period,
            bb_period: self.bb_period,
            bb_std_dev: self.bb_std_dev,
            ema_period: self.ema_period,
            adx_period: self.adx_period,
            ..IndicatorConfig::default()
        }
    }
}
