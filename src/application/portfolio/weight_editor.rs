use crate::domain::errors::EngineError;
use crate::domain::portfolio::SecurityWeight;
use tracing::{debug, warn};

/// Overrides one security's weight and rescales every other holding so the
/// portfolio keeps summing to 100.
///
/// When the other holdings carry no weight at all, only the target changes.
pub fn set_weight(
    current: &[SecurityWeight],
    target_id: &str,
    new_weight: f64,
) -> Result<Vec<SecurityWeight>, EngineError> {
    if !new_weight.is_finite() || !(0.0..=100.0).contains(&new_weight) {
        warn!(
            "WeightEditor: rejected weight {} for {}",
            new_weight, target_id
        );
        return Err(EngineError::InvalidWeight {
            security_id: target_id.to_string(),
            weight: new_weight,
        });
    }

    if let Some(bad) = current
        .iter()
        .find(|sec| !sec.weight.is_finite() || sec.weight < 0.0)
    {
        warn!(
            "WeightEditor: held weight {} for {} is not usable",
            bad.weight, bad.security_id
        );
        return Err(EngineError::InvalidWeight {
            security_id: bad.security_id.clone(),
            weight: bad.weight,
        });
    }

    if !current.iter().any(|sec| sec.security_id == target_id) {
        return Err(EngineError::UnknownSecurity {
            security_id: target_id.to_string(),
        });
    }

    let others_total: f64 = current
        .iter()
        .filter(|sec| sec.security_id != target_id)
        .map(|sec| sec.weight)
        .sum();

    let ratio = if others_total <= 0.0 {
        None
    } else {
        Some((100.0 - new_weight) / others_total)
    };

    debug!(
        "WeightEditor: {} -> {:.4}% (others total {:.4}%, ratio {:?})",
        target_id, new_weight, others_total, ratio
    );

    let updated = current
        .iter()
        .map(|sec| {
            let weight = if sec.security_id == target_id {
                new_weight
            } else {
                match ratio {
                    Some(ratio) => sec.weight * ratio,
                    None => sec.weight,
                }
            };
            SecurityWeight {
                weight,
                ..sec.clone()
            }
        })
        .collect();

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::portfolio::WEIGHT_TOLERANCE;

    fn holdings(weights: &[(&str, f64)]) -> Vec<SecurityWeight> {
        weights
            .iter()
            .map(|(id, w)| SecurityWeight::new(*id, *id, *w))
            .collect()
    }

    #[test]
    fn test_redistributes_remainder_proportionally() {
        let current = holdings(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);

        let updated = set_weight(&current, "A", 60.0).unwrap();

        assert_eq!(updated[0].weight, 60.0);
        // B:C keeps its 3:2 ratio over the remaining 40
        assert!((updated[1].weight - 24.0).abs() < WEIGHT_TOLERANCE);
        assert!((updated[2].weight - 16.0).abs() < WEIGHT_TOLERANCE);
        assert!((SecurityWeight::total(&updated) - 100.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_target_weight_is_exact() {
        let current = holdings(&[("A", 33.3), ("B", 33.3), ("C", 33.4)]);

        let updated = set_weight(&current, "C", 12.345).unwrap();

        assert_eq!(updated[2].weight, 12.345);
        assert!((SecurityWeight::total(&updated) - 100.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_single_security_sets_weight_directly() {
        let current = holdings(&[("A", 100.0)]);

        let updated = set_weight(&current, "A", 40.0).unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].weight, 40.0);
    }

    #[test]
    fn test_zero_weight_others_stay_zero() {
        let current = holdings(&[("A", 100.0), ("B", 0.0)]);

        let updated = set_weight(&current, "A", 70.0).unwrap();

        assert_eq!(updated[0].weight, 70.0);
        assert_eq!(updated[1].weight, 0.0);
    }

    #[test]
    fn test_reapplying_current_weight_is_idempotent() {
        let current = holdings(&[("A", 12.5), ("B", 47.5), ("C", 40.0)]);

        let updated = set_weight(&current, "B", 47.5).unwrap();

        for (before, after) in current.iter().zip(updated.iter()) {
            assert_eq!(before.security_id, after.security_id);
            assert!((before.weight - after.weight).abs() < WEIGHT_TOLERANCE);
        }
    }

    #[test]
    fn test_full_weight_zeroes_others() {
        let current = holdings(&[("A", 20.0), ("B", 80.0)]);

        let updated = set_weight(&current, "A", 100.0).unwrap();

        assert_eq!(updated[0].weight, 100.0);
        assert!(updated[1].weight.abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let current = holdings(&[("A", 50.0), ("B", 50.0)]);

        assert!(matches!(
            set_weight(&current, "A", 100.5),
            Err(EngineError::InvalidWeight { .. })
        ));
        assert!(matches!(
            set_weight(&current, "A", -0.1),
            Err(EngineError::InvalidWeight { .. })
        ));
        assert!(matches!(
            set_weight(&current, "A", f64::NAN),
            Err(EngineError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_rejects_unusable_held_weight() {
        let current = holdings(&[("A", 50.0), ("B", f64::NAN)]);

        let err = set_weight(&current, "A", 60.0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidWeight { ref security_id, .. } if security_id == "B"
        ));

        let current = holdings(&[("A", 50.0), ("B", -5.0)]);
        assert!(matches!(
            set_weight(&current, "A", 60.0),
            Err(EngineError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_security() {
        let current = holdings(&[("A", 50.0), ("B", 50.0)]);

        let err = set_weight(&current, "Z", 10.0).unwrap_err();

        assert_eq!(
            err,
            EngineError::UnknownSecurity {
                security_id: "Z".to_string()
            }
        );
    }
}
