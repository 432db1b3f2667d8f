use serde::{Deserialize, Serialize};

/// Lookback periods used when computing indicator readings from candles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub ema_period: usize,
    pub adx_period: usize,
    /// Minimum series length before any indicator is attempted
    pub min_candles: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
            ema_period: 20,
            adx_period: 14,
            min_candles: 20,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), String> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast_period", self.macd_fast_period),
            ("macd_slow_period", self.macd_slow_period),
            ("macd_signal_period", self.macd_signal_period),
            ("bb_period", self.bb_period),
            ("ema_period", self.ema_period),
            ("adx_period", self.adx_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(format!("{} must be > 0", name));
        }
        if self.macd_fast_period >= self.macd_slow_period {
            return Err(format!(
                "macd_fast_period ({}) must be shorter than macd_slow_period ({})",
                self.macd_fast_period, self.macd_slow_period
            ));
        }
        if !self.bb_std_dev.is_finite() || self.bb_std_dev <= 0.0 {
            return Err(format!("Invalid bb_std_dev: {}", self.bb_std_dev));
        }
        Ok(())
    }

    /// Candles needed before RSI is reported.
    pub fn rsi_warmup(&self) -> usize {
        self.rsi_period + 1
    }

    /// Candles needed before MACD is reported.
    pub fn macd_warmup(&self) -> usize {
        self.macd_slow_period + self.macd_signal_period
    }

    /// Candles needed before ADX is reported.
    pub fn adx_warmup(&self) -> usize {
        self.adx_period * 2
    }
}
