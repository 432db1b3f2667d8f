use crate::domain::errors::EngineError;
use crate::domain::portfolio::{PortfolioEntry, SecurityWeight};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// One security tracked by the draft: its weight (percent), whether the user
/// selected it, and its last known price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftHolding {
    pub security_id: String,
    pub weight: f64,
    pub selected: bool,
    pub price: Option<Decimal>,
}

/// Selection state built up while the user picks securities.
///
/// Only selected holdings with a known positive price become allocation
/// entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioDraft {
    holdings: Vec<DraftHolding>,
}

impl PortfolioDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holdings(&self) -> &[DraftHolding] {
        &self.holdings
    }

    pub fn get(&self, security_id: &str) -> Option<&DraftHolding> {
        self.holdings.iter().find(|h| h.security_id == security_id)
    }

    fn get_mut(&mut self, security_id: &str) -> Option<&mut DraftHolding> {
        self.holdings
            .iter_mut()
            .find(|h| h.security_id == security_id)
    }

    /// Tracks `security_id` (unselected) or updates its weight.
    pub fn upsert(&mut self, security_id: &str, weight: f64) {
        match self.get_mut(security_id) {
            Some(holding) => holding.weight = weight,
            None => self.holdings.push(DraftHolding {
                security_id: security_id.to_string(),
                weight,
                selected: false,
                price: None,
            }),
        }
    }

    /// Flips the selection of `security_id`, tracking it as selected when it
    /// is new. Returns the new selection state.
    pub fn toggle(&mut self, security_id: &str, weight: f64) -> bool {
        match self.get_mut(security_id) {
            Some(holding) => {
                holding.selected = !holding.selected;
                holding.selected
            }
            None => {
                self.holdings.push(DraftHolding {
                    security_id: security_id.to_string(),
                    weight,
                    selected: true,
                    price: None,
                });
                true
            }
        }
    }

    /// True when no positive price is known yet for `security_id`.
    pub fn needs_price(&self, security_id: &str) -> bool {
        self.get(security_id).and_then(|h| h.price).is_none()
    }

    /// Stores the last observed price. Non-positive prices are treated as
    /// unknown.
    pub fn record_price(&mut self, security_id: &str, price: Decimal) {
        let price = if price > Decimal::ZERO {
            Some(price)
        } else {
            warn!(
                "PortfolioDraft: ignoring non-positive price {} for {}",
                price, security_id
            );
            None
        };
        match self.get_mut(security_id) {
            Some(holding) => holding.price = price,
            None => self.holdings.push(DraftHolding {
                security_id: security_id.to_string(),
                weight: 0.0,
                selected: false,
                price,
            }),
        }
    }

    /// Copies weights back after an index merge or a weight edit.
    pub fn sync_weights(&mut self, weights: &[SecurityWeight]) {
        for sec in weights {
            if let Some(holding) = self.get_mut(&sec.security_id) {
                holding.weight = sec.weight;
            }
        }
    }

    /// Selected holdings that still have no price.
    pub fn missing_prices(&self) -> Vec<&str> {
        self.holdings
            .iter()
            .filter(|h| h.selected && h.price.is_none())
            .map(|h| h.security_id.as_str())
            .collect()
    }

    /// Allocation entries for every selected holding with a known price.
    ///
    /// Weights are converted from percent to fractions.
    pub fn entries(&self) -> Result<Vec<PortfolioEntry>, EngineError> {
        let entries: Vec<PortfolioEntry> = self
            .holdings
            .iter()
            .filter(|h| h.selected)
            .filter_map(|h| {
                h.price
                    .map(|price| PortfolioEntry::new(h.security_id.clone(), h.weight / 100.0, price))
            })
            .collect();

        debug!(
            "PortfolioDraft: {} eligible of {} tracked ({} missing prices)",
            entries.len(),
            self.holdings.len(),
            self.missing_prices().len()
        );

        if entries.is_empty() {
            return Err(EngineError::NoEligibleEntries);
        }
        Ok(entries)
    }
}
