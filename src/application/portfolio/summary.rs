use crate::domain::errors::EngineError;
use crate::domain::portfolio::{AllocationResult, PortfolioEntry, ReturnOutlook};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Totals of a computed allocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub capital: Decimal,
    /// Cost of all whole-lot purchases
    pub portfolio_value: Decimal,
    /// Capital left over after rounding down to whole shares
    pub uninvested_cash: Decimal,
    /// Expected return in percent
    pub expected_yield_pct: f64,
    pub outlook: ReturnOutlook,
}

/// Summarizes an allocation produced from `entries`.
///
/// When `predictions` holds a predicted price for at least one entry, the
/// expected yield is the weight-averaged predicted price change of those
/// entries. Otherwise it falls back to `(portfolio_value - capital) / capital`.
pub fn summarize_allocation(
    capital: Decimal,
    results: &[AllocationResult],
    entries: &[PortfolioEntry],
    predictions: &HashMap<String, Decimal>,
) -> Result<PortfolioSummary, EngineError> {
    if capital <= Decimal::ZERO {
        return Err(EngineError::InvalidCapital { capital });
    }

    let portfolio_value = results
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.allocated_capital))
        .ok_or_else(|| EngineError::invalid_input("portfolio value overflows"))?;
    let uninvested_cash = capital
        .checked_sub(portfolio_value)
        .ok_or_else(|| EngineError::invalid_input("uninvested cash overflows"))?;

    let expected_yield_pct = match predicted_yield_pct(entries, predictions)? {
        Some(predicted) => predicted,
        None => percent_change(capital, portfolio_value)
            .ok_or_else(|| EngineError::invalid_input("portfolio yield overflows"))?
            .to_f64()
            .unwrap_or(0.0),
    };

    debug!(
        "PortfolioSummary: value={} uninvested={} yield={:.2}%",
        portfolio_value, uninvested_cash, expected_yield_pct
    );

    Ok(PortfolioSummary {
        capital,
        portfolio_value,
        uninvested_cash,
        expected_yield_pct,
        outlook: ReturnOutlook::from_yield_pct(expected_yield_pct),
    })
}

fn predicted_yield_pct(
    entries: &[PortfolioEntry],
    predictions: &HashMap<String, Decimal>,
) -> Result<Option<f64>, EngineError> {
    let total_weight: f64 = entries.iter().map(|e| e.weight).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return Ok(None);
    }

    let mut any_prediction = false;
    let mut weighted_yield = 0.0;
    for entry in entries {
        let Some(predicted) = predictions.get(&entry.security_id) else {
            continue;
        };
        if entry.price <= Decimal::ZERO {
            return Err(EngineError::InvalidPrice {
                security_id: entry.security_id.clone(),
                price: entry.price,
            });
        }
        let change_pct = percent_change(entry.price, *predicted)
            .ok_or_else(|| {
                EngineError::invalid_input(format!(
                    "predicted price {} for {} overflows the yield",
                    predicted, entry.security_id
                ))
            })?
            .to_f64()
            .unwrap_or(0.0);
        weighted_yield += change_pct * entry.weight / total_weight;
        any_prediction = true;
    }

    Ok(any_prediction.then_some(weighted_yield))
}

/// `(to - from) / from * 100`, None on overflow or a zero base.
fn percent_change(from: Decimal, to: Decimal) -> Option<Decimal> {
    to.checked_sub(from)?
        .checked_div(from)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::portfolio::allocate;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn sample() -> (Vec<PortfolioEntry>, Vec<AllocationResult>) {
        let entries = vec![
            PortfolioEntry::new("A", 0.6, dec!(300)),
            PortfolioEntry::new("B", 0.4, dec!(300)),
        ];
        let results = allocate(dec!(10000), &entries).unwrap();
        (entries, results)
    }

    #[test]
    fn test_summary_reports_uninvested_cash() {
        let (entries, results) = sample();

        let summary = summarize_allocation(dec!(10000), &results, &entries, &HashMap::new()).unwrap();

        // A: 20 shares = 6000, B: 13 shares = 3900
        assert_eq!(summary.portfolio_value, dec!(9900));
        assert_eq!(summary.uninvested_cash, dec!(100));
        assert!((summary.expected_yield_pct - (-1.0)).abs() < 1e-9);
        assert_eq!(summary.outlook, ReturnOutlook::SmallDecrease);
    }

    #[test]
    fn test_summary_uses_predictions_when_present() {
        let (entries, results) = sample();
        let predictions = HashMap::from([
            ("A".to_string(), dec!(330)),
            ("B".to_string(), dec!(285)),
        ]);

        let summary = summarize_allocation(dec!(10000), &results, &entries, &predictions).unwrap();

        // 0.6 * 10% + 0.4 * -5% = 4%
        assert!((summary.expected_yield_pct - 4.0).abs() < 1e-9);
        assert_eq!(summary.outlook, ReturnOutlook::ModerateGrowth);
    }

    #[test]
    fn test_summary_rejects_overflowing_prediction() {
        let entries = vec![PortfolioEntry::new("A", 1.0, dec!(0.01))];
        let results = allocate(dec!(10000), &entries).unwrap();
        let predictions = HashMap::from([(
            "A".to_string(),
            Decimal::from_str("1000000000000000000000000000").unwrap(),
        )]);

        let err = summarize_allocation(dec!(10000), &results, &entries, &predictions).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_summary_rejects_non_positive_capital() {
        let (entries, results) = sample();
        assert!(summarize_allocation(Decimal::ZERO, &results, &entries, &HashMap::new()).is_err());
    }
}
