use crate::config::{Config, LogFormat};
use std::collections::HashMap;

fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<&str, &str> = vars.iter().copied().collect();
    Config::from_lookup(&|key| vars.get(key).map(|value| value.to_string()))
}

#[test]
fn test_config_defaults() {
    let config = load(&[]).unwrap();

    assert!((config.aggregation.min_weight_threshold - 0.3).abs() < 1e-12);
    let policy = config.signals.to_policy();
    assert_eq!(policy.weights.rsi, 2);
    assert_eq!(policy.weights.macd, 2);
    assert_eq!(policy.weights.bb, 1);
    assert_eq!(policy.weights.ema, 1);
    assert_eq!(policy.strong_trend_adx, 25.0);
    assert_eq!(policy.strong_tally_threshold, 3);

    let indicators = config.indicators.to_indicator_config();
    assert_eq!(indicators.rsi_period, 14);
    assert_eq!(indicators.macd_slow_period, 26);
    assert_eq!(indicators.min_candles, 20);
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
}

#[test]
fn test_config_overrides() {
    let config = load(&[
        ("MIN_WEIGHT_THRESHOLD", "0.5"),
        ("SIGNAL_WEIGHT_EMA", "3"),
        ("STRONG_TREND_ADX", "30"),
        ("BB_STD_DEV", "2.5"),
        ("LOG_FORMAT", "json"),
        ("RUST_LOG", "indexfolio=debug"),
    ])
    .unwrap();

    assert!((config.aggregation.min_weight_threshold - 0.5).abs() < 1e-12);
    assert_eq!(config.signals.ema_weight, 3);
    assert_eq!(config.signals.to_policy().strong_trend_adx, 30.0);
    assert_eq!(config.indicators.bb_std_dev, 2.5);
    assert_eq!(config.observability.log_format, LogFormat::Json);
    assert_eq!(config.observability.log_filter, "indexfolio=debug");
}

#[test]
fn test_config_rejects_unparsable_number() {
    let err = load(&[("RSI_PERIOD", "fourteen")]).unwrap_err();
    assert!(format!("{:#}", err).contains("RSI_PERIOD"));
}

#[test]
fn test_config_rejects_out_of_range_threshold() {
    let err = load(&[("MIN_WEIGHT_THRESHOLD", "150")]).unwrap_err();
    assert!(format!("{:#}", err).contains("MIN_WEIGHT_THRESHOLD"));
}

#[test]
fn test_config_rejects_inverted_macd_periods() {
    let err = load(&[("MACD_FAST_PERIOD", "30")]).unwrap_err();
    assert!(format!("{:#}", err).contains("macd_fast_period"));
}

#[test]
fn test_config_rejects_invalid_policy() {
    assert!(load(&[("STRONG_TREND_ADX", "120")]).is_err());
}

#[test]
fn test_config_rejects_oversized_vote_weight() {
    let err = load(&[("SIGNAL_WEIGHT_RSI", "4294967295")]).unwrap_err();
    assert!(format!("{:#}", err).contains("RSI vote weight"));
    assert!(load(&[("SIGNAL_WEIGHT_MACD", "100")]).is_ok());
}
