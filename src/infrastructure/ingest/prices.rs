use super::LenientNumber;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a price lookup for one security
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceQuote {
    Available(Decimal),
    Unavailable(String),
}

impl PriceQuote {
    /// The price, when one was quoted and it is positive.
    pub fn price(&self) -> Option<Decimal> {
        match self {
            PriceQuote::Available(price) if *price > Decimal::ZERO => Some(*price),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSecurityInfo {
    #[serde(default, alias = "PREVPRICE")]
    prevprice: Option<LenientNumber>,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    price: Option<LenientNumber>,
    #[serde(default, alias = "PREVPRICE")]
    prevprice: Option<LenientNumber>,
    #[serde(default)]
    security: Option<RawSecurityInfo>,
}

impl RawQuote {
    fn into_quote(self) -> Result<PriceQuote> {
        if let Some(error) = self.error {
            return Ok(PriceQuote::Unavailable(error));
        }
        let nested = self.security.and_then(|security| security.prevprice);
        match self.price.or(self.prevprice).or(nested) {
            Some(price) => Ok(PriceQuote::Available(price.to_decimal()?)),
            None => Ok(PriceQuote::Unavailable("no price quoted".to_string())),
        }
    }
}

/// Parses a single security lookup response.
pub fn parse_price_quote(json: &str) -> Result<PriceQuote> {
    let raw: RawQuote = serde_json::from_str(json).context("Failed to parse price quote")?;
    raw.into_quote()
}

/// Parses a map of security id to lookup response.
pub fn parse_price_quotes(json: &str) -> Result<BTreeMap<String, PriceQuote>> {
    let raw: BTreeMap<String, RawQuote> =
        serde_json::from_str(json).context("Failed to parse price quotes")?;
    raw.into_iter()
        .map(|(security_id, quote)| {
            let quote = quote
                .into_quote()
                .with_context(|| format!("Invalid price for {}", security_id))?;
            Ok((security_id, quote))
        })
        .collect()
}
