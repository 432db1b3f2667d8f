use crate::domain::signals::{
    Action, IndicatorBundle, IndicatorKey, IndicatorReadings, SignalPolicy, StatusTag, Strength,
    VoteResult, VoteTally,
};
use tracing::debug;

pub const CONFLICTING_SIGNALS: &str = "Hold. The signals of the indicators are conflicting.";
const BUY_STRONG: &str =
    "The signals of the majority of indicators are positive. The trend is strong.";
const BUY_WEAK: &str = "The signals of the majority of indicators are positive. The trend is weak.";
const SELL_STRONG: &str =
    "The signals of the majority of indicators are negative. The trend is strong.";
const SELL_WEAK: &str =
    "The signals of the majority of indicators are negative. The trend is weak.";

/// Weighted vote over RSI, MACD, Bollinger Bands and EMA recommendations.
///
/// - Each present indicator adds its policy weight to the tally of its action.
/// - The strictly highest tally wins; any tie for the maximum is Neutral.
/// - A Buy/Sell winner is strong only when ADX confirms the trend and the
///   winning tally reaches the policy threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalAggregator {
    policy: SignalPolicy,
}

impl SignalAggregator {
    pub fn new(policy: SignalPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SignalPolicy {
        &self.policy
    }

    pub fn tally(&self, readings: &IndicatorReadings) -> VoteTally {
        IndicatorKey::VOTING
            .iter()
            .filter_map(|key| readings.get(key).map(|reading| (*key, reading)))
            .fold(VoteTally::default(), |mut tally, (key, reading)| {
                tally.add(reading.action(), self.policy.weights.weight_for(key));
                tally
            })
    }

    /// Combines `readings` into one recommendation. A non-finite `adx` never
    /// confirms a trend.
    pub fn summarize(&self, readings: &IndicatorReadings, adx: f64) -> VoteResult {
        let tally = self.tally(readings);

        let result = match tally.unique_winner() {
            Some(action @ (Action::Buy | Action::Sell)) => {
                let is_strong = adx >= self.policy.strong_trend_adx
                    && tally.get(action) >= self.policy.strong_tally_threshold;
                let strength = if is_strong {
                    Strength::Strong
                } else {
                    Strength::Weak
                };
                let description = match (action, strength) {
                    (Action::Buy, Strength::Strong) => BUY_STRONG,
                    (Action::Buy, Strength::Weak) => BUY_WEAK,
                    (_, Strength::Strong) => SELL_STRONG,
                    (_, Strength::Weak) => SELL_WEAK,
                };
                VoteResult {
                    action,
                    strength: Some(strength),
                    status: StatusTag::from_vote(action, Some(strength)),
                    description: description.to_string(),
                    tally,
                }
            }
            _ => neutral(tally),
        };

        debug!(
            "SignalAggregator: buy={} sell={} neutral={} adx={:.2} -> {}",
            tally.buy, tally.sell, tally.neutral, adx, result.status
        );

        result
    }

    /// Summarizes a bundle, taking ADX from its ADX reading (0 when absent).
    pub fn summarize_bundle(&self, bundle: &IndicatorBundle) -> VoteResult {
        self.summarize(bundle.readings(), bundle.adx())
    }
}

fn neutral(tally: VoteTally) -> VoteResult {
    VoteResult {
        action: Action::Neutral,
        strength: None,
        status: StatusTag::Neutral,
        description: CONFLICTING_SIGNALS.to_string(),
        tally,
    }
}
