use super::types::IndicatorKey;
use serde::{Deserialize, Serialize};

/// Largest vote weight a single indicator may carry
pub const MAX_VOTE_WEIGHT: u32 = 100;

/// Error type for SignalPolicy validation
#[derive(Debug, thiserror::Error)]
pub enum SignalPolicyError {
    #[error("Invalid SignalPolicy: {0}")]
    ValidationError(String),
}

/// Vote weight of each voting indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWeights {
    pub rsi: u32,
    pub macd: u32,
    pub bb: u32,
    pub ema: u32,
}

impl Default for VoteWeights {
    fn default() -> Self {
        Self {
            rsi: 2,
            macd: 2,
            bb: 1,
            ema: 1,
        }
    }
}

impl VoteWeights {
    /// ADX never votes, so its weight is always 0.
    pub fn weight_for(&self, key: IndicatorKey) -> u32 {
        match key {
            IndicatorKey::Rsi => self.rsi,
            IndicatorKey::Macd => self.macd,
            IndicatorKey::Bb => self.bb,
            IndicatorKey::Ema => self.ema,
            IndicatorKey::Adx => 0,
        }
    }
}

/// Voting policy for the signal aggregator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPolicy {
    pub weights: VoteWeights,
    /// ADX at or above this value confirms a trending market
    pub strong_trend_adx: f64,
    /// Winning tally needed (together with the ADX confirmation) for a strong signal
    pub strong_tally_threshold: u32,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            weights: VoteWeights::default(),
            strong_trend_adx: 25.0,
            strong_tally_threshold: 3,
        }
    }
}

impl SignalPolicy {
    pub fn validate(&self) -> Result<(), SignalPolicyError> {
        if !self.strong_trend_adx.is_finite() || !(0.0..=100.0).contains(&self.strong_trend_adx) {
            return Err(SignalPolicyError::ValidationError(format!(
                "strong_trend_adx must be within 0..=100, got {}",
                self.strong_trend_adx
            )));
        }
        if self.strong_tally_threshold == 0 {
            return Err(SignalPolicyError::ValidationError(
                "strong_tally_threshold must be > 0".to_string(),
            ));
        }
        let mut total: u32 = 0;
        for key in IndicatorKey::VOTING {
            let weight = self.weights.weight_for(key);
            if weight > MAX_VOTE_WEIGHT {
                return Err(SignalPolicyError::ValidationError(format!(
                    "{} vote weight must be <= {}, got {}",
                    key, MAX_VOTE_WEIGHT, weight
                )));
            }
            total = total.checked_add(weight).ok_or_else(|| {
                SignalPolicyError::ValidationError("vote weights overflow".to_string())
            })?;
        }
        if total == 0 {
            return Err(SignalPolicyError::ValidationError(
                "at least one indicator must carry a vote weight".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = SignalPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.weights.weight_for(IndicatorKey::Rsi), 2);
        assert_eq!(policy.weights.weight_for(IndicatorKey::Bb), 1);
        assert_eq!(policy.weights.weight_for(IndicatorKey::Adx), 0);
    }

    #[test]
    fn test_policy_rejects_zero_weights() {
        let policy = SignalPolicy {
            weights: VoteWeights {
                rsi: 0,
                macd: 0,
                bb: 0,
                ema: 0,
            },
            ..SignalPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_rejects_oversized_weight() {
        let policy = SignalPolicy {
            weights: VoteWeights {
                rsi: u32::MAX,
                ..VoteWeights::default()
            },
            ..SignalPolicy::default()
        };
        assert!(policy.validate().is_err());

        let at_cap = SignalPolicy {
            weights: VoteWeights {
                rsi: MAX_VOTE_WEIGHT,
                macd: MAX_VOTE_WEIGHT,
                bb: MAX_VOTE_WEIGHT,
                ema: MAX_VOTE_WEIGHT,
            },
            ..SignalPolicy::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_policy_rejects_out_of_range_adx() {
        let policy = SignalPolicy {
            strong_trend_adx: 140.0,
            ..SignalPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
