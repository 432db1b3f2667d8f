use crate::application::signals::SecuritySignals;
use crate::domain::signals::{
    Action, IndicatorBundle, IndicatorKey, IndicatorReading, IndicatorStatus,
};
use super::LenientNumber;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

const INSUFFICIENT_DATA: &str = "Insufficient data";

#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(default)]
    value: Option<LenientNumber>,
    #[serde(default)]
    macd: Option<LenientNumber>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    recommendation: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    #[serde(default)]
    action: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    value: Option<LenientNumber>,
}

#[derive(Debug, Deserialize)]
struct RawSecuritySignals {
    #[serde(alias = "SECID", alias = "ticker", alias = "security_id")]
    secid: String,
    #[serde(default, alias = "WEIGHT")]
    weight: f64,
    indicators: BTreeMap<String, Value>,
}

fn parse_action(action: &str) -> Action {
    match action.trim().to_lowercase().as_str() {
        "buy" => Action::Buy,
        "sell" => Action::Sell,
        _ => Action::Neutral,
    }
}

fn finite(field: &str, number: Option<&LenientNumber>) -> Result<Option<f64>> {
    let Some(number) = number else {
        return Ok(None);
    };
    let value = number.to_f64().with_context(|| format!("Bad {}", field))?;
    if !value.is_finite() {
        bail!("Bad {}: {} is not finite", field, value);
    }
    Ok(Some(value))
}

/// Converts one raw indicator entry.
///
/// - A structured recommendation votes with its action (unknown actions are Neutral).
/// - A textual recommendation such as "Insufficient data" votes Neutral.
/// - Without any recommendation only ADX survives, carrying its value.
fn convert(key: IndicatorKey, raw: RawReading) -> Result<IndicatorReading> {
    let value = finite("value", raw.value.as_ref())?;
    let macd = finite("macd", raw.macd.as_ref())?;
    let status = raw.status.as_deref().and_then(IndicatorStatus::parse);

    let reading = match raw.recommendation {
        Some(object @ Value::Object(_)) => {
            let rec: RawRecommendation =
                serde_json::from_value(object).context("Malformed recommendation")?;
            let rec_value = finite("recommendation value", rec.value.as_ref())?;
            let value = value.or(macd).or(rec_value).unwrap_or(0.0);
            IndicatorReading::new(key, value, parse_action(&rec.action), rec.description)
        }
        Some(Value::String(text)) if !text.trim().is_empty() => {
            let reading = IndicatorReading::new(
                key,
                value.or(macd).unwrap_or(0.0),
                Action::Neutral,
                text.trim(),
            );
            if status.is_none() && text.trim().eq_ignore_ascii_case(INSUFFICIENT_DATA) {
                reading.with_status(IndicatorStatus::InsufficientData)
            } else {
                reading
            }
        }
        _ if key == IndicatorKey::Adx => match value {
            Some(value) => IndicatorReading::new(key, value, Action::Neutral, ""),
            None => bail!("ADX reading has no value"),
        },
        _ => bail!("no recommendation"),
    };

    Ok(match status {
        Some(status) => reading.with_status(status),
        None => reading,
    })
}

fn bundle_from_map(raw: BTreeMap<String, Value>) -> IndicatorBundle {
    raw.into_iter()
        .filter_map(|(name, value)| {
            let key = IndicatorKey::parse(&name)?;
            let converted = serde_json::from_value::<RawReading>(value)
                .context("Malformed reading")
                .and_then(|reading| convert(key, reading));
            match converted {
                Ok(reading) => Some(reading),
                Err(err) => {
                    warn!("ingest: dropping {} reading: {:#}", key, err);
                    None
                }
            }
        })
        .collect()
}

/// Parses a per-indicator map (`{"RSI": {...}, "MACD": {...}}`) into a bundle.
/// Unknown keys such as `overall` are ignored.
pub fn parse_indicator_bundle(json: &str) -> Result<IndicatorBundle> {
    let raw: BTreeMap<String, Value> =
        serde_json::from_str(json).context("Failed to parse indicator readings")?;
    Ok(bundle_from_map(raw))
}

/// Parses `[{secid, weight, indicators: {...}}]` rows for the signal board.
pub fn parse_security_signals(json: &str) -> Result<Vec<SecuritySignals>> {
    let raw: Vec<RawSecuritySignals> =
        serde_json::from_str(json).context("Failed to parse security signals")?;
    Ok(raw
        .into_iter()
        .map(|row| SecuritySignals {
            security_id: row.secid,
            weight: row.weight,
            bundle: bundle_from_map(row.indicators),
        })
        .collect())
}
