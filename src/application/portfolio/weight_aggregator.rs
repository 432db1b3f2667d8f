use crate::domain::errors::EngineError;
use crate::domain::portfolio::{AggregationOutcome, IndexContribution, SecurityWeight};
use std::collections::HashMap;
use tracing::{debug, info};

/// Merges the constituents of the selected indexes into one weight vector.
///
/// - Weights are merged by maximum, never summed, so a security held by
///   several indexes is not double-counted.
/// - With more than one index, securities below `min_weight_threshold`
///   (percentage points) are dropped and counted. A single index keeps all
///   of its constituents.
/// - Survivors are renormalized to sum to 100, in first-seen order.
pub fn aggregate(
    contributions: &[IndexContribution],
    min_weight_threshold: f64,
) -> Result<AggregationOutcome, EngineError> {
    if !min_weight_threshold.is_finite() || min_weight_threshold < 0.0 {
        return Err(EngineError::invalid_input(format!(
            "min weight threshold must be a non-negative number, got {}",
            min_weight_threshold
        )));
    }

    if contributions.is_empty() {
        return Ok(AggregationOutcome::default());
    }

    let merged = merge_by_max(contributions)?;
    let apply_threshold = contributions.len() > 1;

    let (kept, dropped): (Vec<SecurityWeight>, Vec<SecurityWeight>) = merged
        .into_iter()
        .partition(|sec| !apply_threshold || sec.weight >= min_weight_threshold);

    let kept_total = SecurityWeight::total(&kept);
    if kept.is_empty() || kept_total <= 0.0 {
        let excluded_count = kept.len() + dropped.len();
        info!(
            "WeightAggregator: nothing left to normalize ({} indexes, {} securities excluded)",
            contributions.len(),
            excluded_count
        );
        return Ok(AggregationOutcome {
            kept: Vec::new(),
            excluded_count,
        });
    }

    let kept = kept
        .into_iter()
        .map(|sec| SecurityWeight {
            weight: sec.weight / kept_total * 100.0,
            ..sec
        })
        .collect::<Vec<_>>();

    debug!(
        "WeightAggregator: {} indexes -> {} kept, {} below {:.2}%",
        contributions.len(),
        kept.len(),
        dropped.len(),
        min_weight_threshold
    );

    Ok(AggregationOutcome {
        kept,
        excluded_count: dropped.len(),
    })
}

/// Folds every contributed security into a fresh list keyed by id,
/// keeping the first display name and the largest weight.
fn merge_by_max(contributions: &[IndexContribution]) -> Result<Vec<SecurityWeight>, EngineError> {
    let (merged, _) = contributions
        .iter()
        .flat_map(|contribution| contribution.securities.iter())
        .try_fold(
            (Vec::<SecurityWeight>::new(), HashMap::<&str, usize>::new()),
            |(mut merged, mut positions), security| {
                if !security.weight.is_finite() || security.weight < 0.0 {
                    return Err(EngineError::InvalidWeight {
                        security_id: security.security_id.clone(),
                        weight: security.weight,
                    });
                }
                match positions.get(security.security_id.as_str()) {
                    Some(&idx) => {
                        let existing = &mut merged[idx];
                        existing.weight = existing.weight.max(security.weight);
                    }
                    None => {
                        positions.insert(security.security_id.as_str(), merged.len());
                        merged.push(security.clone());
                    }
                }
                Ok((merged, positions))
            },
        )?;
    Ok(merged)
}

/// Aggregator bound to a configured exclusion threshold
#[derive(Debug, Clone, Copy)]
pub struct WeightAggregator {
    min_weight_threshold: f64,
}

impl WeightAggregator {
    pub fn new(min_weight_threshold: f64) -> Self {
        Self {
            min_weight_threshold,
        }
    }

    pub fn min_weight_threshold(&self) -> f64 {
        self.min_weight_threshold
    }

    pub fn aggregate(
        &self,
        contributions: &[IndexContribution],
    ) -> Result<AggregationOutcome, EngineError> {
        aggregate(contributions, self.min_weight_threshold)
    }
}

impl Default for WeightAggregator {
    fn default() -> Self {
        Self::new(0.3)
    }
}
