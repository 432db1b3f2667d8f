use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a weight vector sums to 100%.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// A security together with its portfolio weight, in percent (0..=100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityWeight {
    pub security_id: String,
    pub display_name: String,
    pub weight: f64,
}

impl SecurityWeight {
    pub fn new(security_id: impl Into<String>, display_name: impl Into<String>, weight: f64) -> Self {
        Self {
            security_id: security_id.into(),
            display_name: display_name.into(),
            weight,
        }
    }

    pub fn total(weights: &[SecurityWeight]) -> f64 {
        weights.iter().map(|w| w.weight).sum()
    }
}

/// Constituents of one selected index, with the index's published weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexContribution {
    pub index_id: String,
    pub name: String,
    pub securities: Vec<SecurityWeight>,
}

/// Result of merging one or more index contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationOutcome {
    /// Surviving securities, first-seen order, renormalized to 100%
    pub kept: Vec<SecurityWeight>,
    /// Securities dropped by the minimum weight threshold
    pub excluded_count: usize,
}

impl AggregationOutcome {
    /// True when securities were contributed but none survived.
    pub fn is_degenerate(&self) -> bool {
        self.kept.is_empty() && self.excluded_count > 0
    }
}

/// Unit consumed by the allocation calculator.
///
/// `weight` is a fraction; entries are normalized against each other so any
/// positive scale works. `price` is the last observed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub security_id: String,
    pub weight: f64,
    pub price: Decimal,
}

impl PortfolioEntry {
    pub fn new(security_id: impl Into<String>, weight: f64, price: Decimal) -> Self {
        Self {
            security_id: security_id.into(),
            weight,
            price,
        }
    }
}

/// Whole-lot purchase recommendation for one security
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub security_id: String,
    pub shares: u64,
    pub allocated_capital: Decimal,
}
