//! Ingestion boundary.
//!
//! Turns raw JSON from market-data feeds and stored sessions into the
//! canonical records consumed by the portfolio and signal engines. Field
//! name variants (`secid` / `SECID` / `ticker`, ...) and numbers sent as
//! strings are reconciled here so the engines never see them.

pub mod indicators;
pub mod prices;
pub mod securities;

pub use indicators::{parse_indicator_bundle, parse_security_signals};
pub use prices::{PriceQuote, parse_price_quote, parse_price_quotes};
pub use securities::{parse_contributions, parse_index_securities, parse_portfolio_entries};

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::str::FromStr;

/// A number that may arrive as a JSON number or as text such as "12,5"
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            LenientNumber::Number(n) => Ok(*n),
            LenientNumber::Text(text) => normalize(text)
                .parse::<f64>()
                .map_err(|_| anyhow!("Not a number: {:?}", text)),
        }
    }

    pub fn to_decimal(&self) -> Result<Decimal> {
        match self {
            LenientNumber::Number(n) => {
                Decimal::from_f64(*n).ok_or_else(|| anyhow!("Not a finite number: {}", n))
            }
            LenientNumber::Text(text) => Decimal::from_str(&normalize(text))
                .map_err(|_| anyhow!("Not a number: {:?}", text)),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lenient_number_accepts_text_with_comma() {
        let n: LenientNumber = serde_json::from_str("\"12,5\"").unwrap();
        assert_eq!(n.to_f64().unwrap(), 12.5);
        assert_eq!(n.to_decimal().unwrap(), dec!(12.5));
    }

    #[test]
    fn test_lenient_number_accepts_json_number() {
        let n: LenientNumber = serde_json::from_str("285.5").unwrap();
        assert_eq!(n.to_decimal().unwrap(), dec!(285.5));
    }

    #[test]
    fn test_lenient_number_rejects_garbage() {
        let n: LenientNumber = serde_json::from_str("\"n/a\"").unwrap();
        assert!(n.to_f64().is_err());
    }
}
