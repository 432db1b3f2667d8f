use super::adx::WilderAdx;
use crate::domain::errors::EngineError;
use crate::domain::market::Candle;
use crate::domain::signals::{
    Action, IndicatorBundle, IndicatorConfig, IndicatorKey, IndicatorReading, IndicatorStatus,
};
use ta::Next;
use ta::indicators::{
    BollingerBands, ExponentialMovingAverage, MovingAverageConvergenceDivergence,
    RelativeStrengthIndex,
};
use tracing::debug;

/// ADX at or above this level is reported as a strong trend
pub const ADX_TREND_LEVEL: f64 = 25.0;
/// Closes within 1% of a Bollinger band count as touching it
const BAND_TOUCH_TOLERANCE: f64 = 0.01;

const RSI_OVERSOLD: &str =
    "The asset is oversold. Possible upward correction. Consider buying.";
const RSI_NEUTRAL_LOW: &str = "The asset is in the lower part of the range. Potential growth.";
const RSI_NEUTRAL_HIGH: &str = "The asset is in the upper part of the range. Possible correction.";
const RSI_OVERBOUGHT: &str =
    "The asset is overbought. Possible downward correction. Consider selling.";
const MACD_BULLISH: &str = "MACD is above zero and rising. Bullish trend. Consider buying.";
const MACD_BEARISH: &str = "MACD is below zero and falling. Bearish trend. Consider selling.";
const MACD_CROSSOVER_UP: &str = "MACD crossed the signal line upward. Bullish signal.";
const MACD_CROSSOVER_DOWN: &str = "MACD crossed the signal line downward. Bearish signal.";
const BB_LOWER_TOUCH: &str = "Price touched the lower band. Possible rebound upward.";
const BB_UPPER_TOUCH: &str = "Price touched the upper band. Possible pullback downward.";
const BB_MIDDLE: &str = "Price is in the middle of the band. Trend continues.";
const EMA_ABOVE: &str = "Price is above EMA. Uptrend.";
const EMA_BELOW: &str = "Price is below EMA. Downtrend.";
const ADX_STRONG: &str = "ADX is above 25. Strong trend. Follow the trend.";
const ADX_WEAK: &str = "ADX is below 25. Weak or sideways trend. Be careful.";
const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Computes RSI, MACD, Bollinger Bands, EMA and ADX readings from a candle
/// series (oldest first).
///
/// Once the series reaches `min_candles`, an indicator whose own warm-up is
/// not met yields a Neutral reading with status `insufficient_data`, so it
/// still takes part in the vote. MACD is left out when no rule matches the
/// latest bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorAnalyzer {
    config: IndicatorConfig,
}

impl IndicatorAnalyzer {
    pub fn new(config: IndicatorConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|reason| EngineError::Indicator { reason })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn analyze(&self, candles: &[Candle]) -> Result<IndicatorBundle, EngineError> {
        let mut bundle = IndicatorBundle::new();
        if candles.len() < self.config.min_candles {
            debug!(
                "IndicatorAnalyzer: {} candles < {} required, skipping",
                candles.len(),
                self.config.min_candles
            );
            return Ok(bundle);
        }

        let closes: Vec<f64> = candles.iter().map(Candle::close_f64).collect();
        let Some(&last_close) = closes.last() else {
            return Ok(bundle);
        };

        let readings = [
            self.rsi(&closes)?,
            self.macd(&closes)?,
            self.bollinger(&closes, last_close)?,
            self.ema(&closes, last_close)?,
            self.adx(candles),
        ];
        for reading in readings.into_iter().flatten() {
            bundle.insert(reading);
        }

        debug!(
            "IndicatorAnalyzer: {} readings from {} candles",
            bundle.len(),
            candles.len()
        );
        Ok(bundle)
    }

    fn rsi(&self, closes: &[f64]) -> Result<Option<IndicatorReading>, EngineError> {
        if closes.len() < self.config.rsi_warmup() {
            return Ok(Some(insufficient(IndicatorKey::Rsi)));
        }
        let mut rsi = RelativeStrengthIndex::new(self.config.rsi_period).map_err(indicator_error)?;
        let value = closes.iter().fold(0.0, |_, close| rsi.next(*close));

        let (action, status, description) = match value {
            v if v <= 30.0 => (Action::Buy, IndicatorStatus::Oversold, RSI_OVERSOLD),
            v if v <= 50.0 => (Action::Neutral, IndicatorStatus::NeutralLow, RSI_NEUTRAL_LOW),
            v if v <= 70.0 => (Action::Neutral, IndicatorStatus::NeutralHigh, RSI_NEUTRAL_HIGH),
            _ => (Action::Sell, IndicatorStatus::Overbought, RSI_OVERBOUGHT),
        };
        Ok(Some(
            IndicatorReading::new(IndicatorKey::Rsi, value, action, description).with_status(status),
        ))
    }

    fn macd(&self, closes: &[f64]) -> Result<Option<IndicatorReading>, EngineError> {
        if closes.len() < self.config.macd_warmup() {
            return Ok(Some(insufficient(IndicatorKey::Macd)));
        }
        let mut macd = MovingAverageConvergenceDivergence::new(
            self.config.macd_fast_period,
            self.config.macd_slow_period,
            self.config.macd_signal_period,
        )
        .map_err(indicator_error)?;

        let mut previous = None;
        let mut latest = None;
        for close in closes {
            let out = macd.next(*close);
            previous = latest;
            latest = Some((out.macd, out.signal, out.histogram));
        }
        let (Some((prev_macd, prev_signal, _)), Some((line, signal, histogram))) = (previous, latest)
        else {
            return Ok(None);
        };

        let (action, status, description) = if line > 0.0 && line > signal {
            (Action::Buy, IndicatorStatus::Bullish, MACD_BULLISH)
        } else if line < 0.0 && line < signal {
            (Action::Sell, IndicatorStatus::Bearish, MACD_BEARISH)
        } else if histogram > 0.0 && line > signal && prev_macd <= prev_signal {
            (Action::Buy, IndicatorStatus::CrossoverUp, MACD_CROSSOVER_UP)
        } else if histogram < 0.0 && line < signal && prev_macd >= prev_signal {
            (Action::Sell, IndicatorStatus::CrossoverDown, MACD_CROSSOVER_DOWN)
        } else {
            return Ok(None);
        };
        Ok(Some(
            IndicatorReading::new(IndicatorKey::Macd, line, action, description).with_status(status),
        ))
    }

    fn bollinger(
        &self,
        closes: &[f64],
        last_close: f64,
    ) -> Result<Option<IndicatorReading>, EngineError> {
        if closes.len() < self.config.bb_period {
            return Ok(Some(insufficient(IndicatorKey::Bb)));
        }
        let mut bb = BollingerBands::new(self.config.bb_period, self.config.bb_std_dev)
            .map_err(indicator_error)?;
        let Some(bands) = closes.iter().map(|close| bb.next(*close)).last() else {
            return Ok(None);
        };

        let (action, status, description) =
            if last_close <= bands.lower * (1.0 + BAND_TOUCH_TOLERANCE) {
                (Action::Buy, IndicatorStatus::LowerTouch, BB_LOWER_TOUCH)
            } else if last_close >= bands.upper * (1.0 - BAND_TOUCH_TOLERANCE) {
                (Action::Sell, IndicatorStatus::UpperTouch, BB_UPPER_TOUCH)
            } else {
                (Action::Neutral, IndicatorStatus::Middle, BB_MIDDLE)
            };
        Ok(Some(
            IndicatorReading::new(IndicatorKey::Bb, last_close, action, description)
                .with_status(status),
        ))
    }

    fn ema(
        &self,
        closes: &[f64],
        last_close: f64,
    ) -> Result<Option<IndicatorReading>, EngineError> {
        if closes.len() < self.config.ema_period {
            return Ok(Some(insufficient(IndicatorKey::Ema)));
        }
        let mut ema = ExponentialMovingAverage::new(self.config.ema_period).map_err(indicator_error)?;
        let value = closes.iter().fold(0.0, |_, close| ema.next(*close));

        let reading = if last_close > value {
            IndicatorReading::new(IndicatorKey::Ema, value, Action::Buy, EMA_ABOVE)
                .with_status(IndicatorStatus::Above)
        } else {
            IndicatorReading::new(IndicatorKey::Ema, value, Action::Sell, EMA_BELOW)
                .with_status(IndicatorStatus::Below)
        };
        Ok(Some(reading))
    }

    fn adx(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        if candles.len() < self.config.adx_warmup() {
            return Some(insufficient(IndicatorKey::Adx));
        }
        let mut adx = WilderAdx::new(self.config.adx_period);
        let value = candles.iter().fold(0.0, |_, candle| {
            adx.next(candle.high_f64(), candle.low_f64(), candle.close_f64())
        });

        let reading = if value >= ADX_TREND_LEVEL {
            IndicatorReading::new(IndicatorKey::Adx, value, Action::Neutral, ADX_STRONG)
                .with_status(IndicatorStatus::Strong)
        } else {
            IndicatorReading::new(IndicatorKey::Adx, value, Action::Neutral, ADX_WEAK)
                .with_status(IndicatorStatus::Weak)
        };
        Some(reading)
    }
}

fn insufficient(key: IndicatorKey) -> IndicatorReading {
    IndicatorReading::new(key, 0.0, Action::Neutral, INSUFFICIENT_DATA)
        .with_status(IndicatorStatus::InsufficientData)
}

fn indicator_error(err: ta::errors::TaError) -> EngineError {
    EngineError::Indicator {
        reason: format!("{:?}", err),
    }
}
