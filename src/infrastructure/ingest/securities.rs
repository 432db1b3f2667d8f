use super::LenientNumber;
use crate::domain::portfolio::{IndexContribution, PortfolioEntry, SecurityWeight};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawSecurity {
    #[serde(alias = "SECID", alias = "secids", alias = "ticker", alias = "security_id")]
    secid: String,
    #[serde(
        default,
        alias = "SECNAME",
        alias = "shortnames",
        alias = "display_name"
    )]
    secname: Option<String>,
    #[serde(default, alias = "WEIGHT")]
    weight: Option<LenientNumber>,
    #[serde(default, alias = "PRICE", alias = "prevprice")]
    price: Option<LenientNumber>,
}

impl RawSecurity {
    fn weight(&self) -> Result<f64> {
        match &self.weight {
            Some(weight) => weight
                .to_f64()
                .with_context(|| format!("Invalid weight for {}", self.secid)),
            None => Ok(0.0),
        }
    }

    fn into_security_weight(self) -> Result<SecurityWeight> {
        let weight = self.weight()?;
        let display_name = self
            .secname
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.secid.clone());
        Ok(SecurityWeight::new(self.secid, display_name, weight))
    }
}

#[derive(Debug, Deserialize)]
struct RawContribution {
    #[serde(alias = "indexid", alias = "INDEXID")]
    index_id: String,
    #[serde(default, alias = "shortname", alias = "SHORTNAME")]
    name: Option<String>,
    securities: Vec<RawSecurity>,
}

/// Parses one index's constituent list.
pub fn parse_index_securities(json: &str) -> Result<Vec<SecurityWeight>> {
    let raw: Vec<RawSecurity> =
        serde_json::from_str(json).context("Failed to parse index securities")?;
    raw.into_iter().map(RawSecurity::into_security_weight).collect()
}

/// Parses the selected indices, each with its constituents.
pub fn parse_contributions(json: &str) -> Result<Vec<IndexContribution>> {
    let raw: Vec<RawContribution> =
        serde_json::from_str(json).context("Failed to parse index contributions")?;
    raw.into_iter()
        .map(|contribution| {
            let securities = contribution
                .securities
                .into_iter()
                .map(RawSecurity::into_security_weight)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Invalid index {}", contribution.index_id))?;
            Ok(IndexContribution {
                name: contribution
                    .name
                    .unwrap_or_else(|| contribution.index_id.clone()),
                index_id: contribution.index_id,
                securities,
            })
        })
        .collect()
}

/// Parses `{secid, weight, price}` rows for allocation. Weights are taken as
/// given; the calculator normalizes them.
pub fn parse_portfolio_entries(json: &str) -> Result<Vec<PortfolioEntry>> {
    let raw: Vec<RawSecurity> =
        serde_json::from_str(json).context("Failed to parse portfolio entries")?;
    raw.into_iter()
        .map(|row| {
            let weight = row.weight()?;
            let price = row
                .price
                .as_ref()
                .with_context(|| format!("Missing price for {}", row.secid))?
                .to_decimal()
                .with_context(|| format!("Invalid price for {}", row.secid))?;
            Ok(PortfolioEntry::new(row.secid, weight, price))
        })
        .collect()
}
