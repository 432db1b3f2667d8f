use crate::domain::errors::EngineError;
use crate::domain::portfolio::{AllocationResult, PortfolioEntry};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::{debug, info};

/// Splits `capital` across `entries` by weight and converts each share of
/// cash into whole shares at the entry's price.
///
/// Share counts are always rounded down, so the allocated total never
/// exceeds `capital`. The remainder stays unallocated. Output order matches
/// input order.
pub fn allocate(
    capital: Decimal,
    entries: &[PortfolioEntry],
) -> Result<Vec<AllocationResult>, EngineError> {
    if capital <= Decimal::ZERO {
        return Err(EngineError::InvalidCapital { capital });
    }
    if entries.is_empty() {
        return Err(EngineError::NoEligibleEntries);
    }

    let weights = entries
        .iter()
        .map(validated_weight)
        .collect::<Result<Vec<Decimal>, EngineError>>()?;

    let total_weight: Decimal = weights.iter().copied().sum();
    if total_weight <= Decimal::ZERO {
        return Err(EngineError::invalid_input("total weight must be > 0"));
    }

    let mut allocated_total = Decimal::ZERO;
    let results = entries
        .iter()
        .zip(weights)
        .map(|(entry, weight)| {
            let target_cash = capital
                .checked_mul(weight)
                .and_then(|cash| cash.checked_div(total_weight))
                .ok_or_else(|| {
                    EngineError::invalid_input(format!(
                        "allocation overflow for {}",
                        entry.security_id
                    ))
                })?;

            let lots = target_cash
                .checked_div(entry.price)
                .map(|lots| lots.floor())
                .unwrap_or(Decimal::MAX);
            let shares = lots.to_u64().ok_or_else(|| {
                EngineError::invalid_input(format!(
                    "share count out of range for {}: {}",
                    entry.security_id, lots
                ))
            })?;
            let allocated_capital = Decimal::from(shares) * entry.price;
            allocated_total += allocated_capital;

            debug!(
                "AllocationCalculator: {} target={} price={} -> {} shares ({})",
                entry.security_id, target_cash, entry.price, shares, allocated_capital
            );

            Ok(AllocationResult {
                security_id: entry.security_id.clone(),
                shares,
                allocated_capital,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    info!(
        "AllocationCalculator: allocated {} of {} across {} securities",
        allocated_total,
        capital,
        results.len()
    );

    Ok(results)
}

fn validated_weight(entry: &PortfolioEntry) -> Result<Decimal, EngineError> {
    if entry.price <= Decimal::ZERO {
        return Err(EngineError::InvalidPrice {
            security_id: entry.security_id.clone(),
            price: entry.price,
        });
    }
    let invalid = || EngineError::InvalidWeight {
        security_id: entry.security_id.clone(),
        weight: entry.weight,
    };
    if !entry.weight.is_finite() || entry.weight < 0.0 {
        return Err(invalid());
    }
    Decimal::from_f64(entry.weight).ok_or_else(invalid)
}
