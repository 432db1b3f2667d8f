use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Technical indicators known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "EMA")]
    Ema,
    #[serde(rename = "ADX")]
    Adx,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 5] = [
        IndicatorKey::Rsi,
        IndicatorKey::Macd,
        IndicatorKey::Bb,
        IndicatorKey::Ema,
        IndicatorKey::Adx,
    ];

    /// Indicators that take part in the vote. ADX only qualifies strength.
    pub const VOTING: [IndicatorKey; 4] = [
        IndicatorKey::Rsi,
        IndicatorKey::Macd,
        IndicatorKey::Bb,
        IndicatorKey::Ema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKey::Rsi => "RSI",
            IndicatorKey::Macd => "MACD",
            IndicatorKey::Bb => "BB",
            IndicatorKey::Ema => "EMA",
            IndicatorKey::Adx => "ADX",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RSI" => Some(IndicatorKey::Rsi),
            "MACD" => Some(IndicatorKey::Macd),
            "BB" | "BBANDS" => Some(IndicatorKey::Bb),
            "EMA" => Some(IndicatorKey::Ema),
            "ADX" => Some(IndicatorKey::Adx),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "Buy"),
            Action::Sell => write!(f, "Sell"),
            Action::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Zone or pattern an indicator value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    // RSI
    Oversold,
    NeutralLow,
    NeutralHigh,
    Overbought,
    // MACD
    Bullish,
    Bearish,
    CrossoverUp,
    CrossoverDown,
    // Bollinger Bands
    LowerTouch,
    UpperTouch,
    Middle,
    // EMA
    Above,
    Below,
    // ADX
    Strong,
    Weak,
    /// Series too short for the indicator's lookback
    InsufficientData,
}

impl IndicatorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorStatus::Oversold => "oversold",
            IndicatorStatus::NeutralLow => "neutral_low",
            IndicatorStatus::NeutralHigh => "neutral_high",
            IndicatorStatus::Overbought => "overbought",
            IndicatorStatus::Bullish => "bullish",
            IndicatorStatus::Bearish => "bearish",
            IndicatorStatus::CrossoverUp => "crossover_up",
            IndicatorStatus::CrossoverDown => "crossover_down",
            IndicatorStatus::LowerTouch => "lower_touch",
            IndicatorStatus::UpperTouch => "upper_touch",
            IndicatorStatus::Middle => "middle",
            IndicatorStatus::Above => "above",
            IndicatorStatus::Below => "below",
            IndicatorStatus::Strong => "strong",
            IndicatorStatus::Weak => "weak",
            IndicatorStatus::InsufficientData => "insufficient_data",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "oversold" => IndicatorStatus::Oversold,
            "neutral_low" => IndicatorStatus::NeutralLow,
            "neutral_high" => IndicatorStatus::NeutralHigh,
            "overbought" => IndicatorStatus::Overbought,
            "bullish" => IndicatorStatus::Bullish,
            "bearish" => IndicatorStatus::Bearish,
            "crossover_up" => IndicatorStatus::CrossoverUp,
            "crossover_down" => IndicatorStatus::CrossoverDown,
            "lower_touch" => IndicatorStatus::LowerTouch,
            "upper_touch" => IndicatorStatus::UpperTouch,
            "middle" => IndicatorStatus::Middle,
            "above" => IndicatorStatus::Above,
            "below" => IndicatorStatus::Below,
            "strong" => IndicatorStatus::Strong,
            "weak" => IndicatorStatus::Weak,
            "insufficient_data" => IndicatorStatus::InsufficientData,
            _ => return None,
        };
        Some(status)
    }
}

impl fmt::Display for IndicatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub description: String,
}

impl Recommendation {
    pub fn new(action: Action, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
        }
    }
}

/// One indicator's value and its directional recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub key: IndicatorKey,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IndicatorStatus>,
    pub recommendation: Recommendation,
}

impl IndicatorReading {
    pub fn new(key: IndicatorKey, value: f64, action: Action, description: impl Into<String>) -> Self {
        Self {
            key,
            value,
            status: None,
            recommendation: Recommendation::new(action, description),
        }
    }

    pub fn with_status(mut self, status: IndicatorStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn action(&self) -> Action {
        self.recommendation.action
    }
}

pub type IndicatorReadings = BTreeMap<IndicatorKey, IndicatorReading>;

/// All readings available for one security
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorBundle {
    readings: IndicatorReadings,
}

/// Plain (unweighted) count of directional recommendations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub buy: usize,
    pub sell: usize,
    pub total: usize,
}

impl IndicatorBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reading: IndicatorReading) {
        self.readings.insert(reading.key, reading);
    }

    pub fn with(mut self, reading: IndicatorReading) -> Self {
        self.insert(reading);
        self
    }

    pub fn get(&self, key: IndicatorKey) -> Option<&IndicatorReading> {
        self.readings.get(&key)
    }

    pub fn readings(&self) -> &IndicatorReadings {
        &self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// ADX value, 0.0 when no ADX reading is present.
    pub fn adx(&self) -> f64 {
        self.get(IndicatorKey::Adx).map(|r| r.value).unwrap_or(0.0)
    }

    /// Counts Buy/Sell recommendations among the voting indicators.
    pub fn signal_counts(&self) -> SignalCounts {
        IndicatorKey::VOTING
            .iter()
            .filter_map(|key| self.get(*key))
            .fold(SignalCounts::default(), |mut counts, reading| {
                counts.total += 1;
                match reading.action() {
                    Action::Buy => counts.buy += 1,
                    Action::Sell => counts.sell += 1,
                    Action::Neutral => {}
                }
                counts
            })
    }
}

impl From<IndicatorReadings> for IndicatorBundle {
    fn from(readings: IndicatorReadings) -> Self {
        Self { readings }
    }
}

impl FromIterator<IndicatorReading> for IndicatorBundle {
    fn from_iter<I: IntoIterator<Item = IndicatorReading>>(iter: I) -> Self {
        let mut bundle = IndicatorBundle::new();
        for reading in iter {
            bundle.insert(reading);
        }
        bundle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Weak,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Strong => write!(f, "strong"),
            Strength::Weak => write!(f, "weak"),
        }
    }
}

/// Grouping key for downstream display of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    BuyStrong,
    BuyWeak,
    SellStrong,
    SellWeak,
    Neutral,
}

impl StatusTag {
    pub fn from_vote(action: Action, strength: Option<Strength>) -> Self {
        match (action, strength) {
            (Action::Buy, Some(Strength::Strong)) => StatusTag::BuyStrong,
            (Action::Buy, _) => StatusTag::BuyWeak,
            (Action::Sell, Some(Strength::Strong)) => StatusTag::SellStrong,
            (Action::Sell, _) => StatusTag::SellWeak,
            (Action::Neutral, _) => StatusTag::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::BuyStrong => "buy_strong",
            StatusTag::BuyWeak => "buy_weak",
            StatusTag::SellStrong => "sell_strong",
            StatusTag::SellWeak => "sell_weak",
            StatusTag::Neutral => "neutral",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted buy/sell/neutral totals behind a vote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub buy: u32,
    pub sell: u32,
    pub neutral: u32,
}

impl VoteTally {
    pub fn add(&mut self, action: Action, weight: u32) {
        match action {
            Action::Buy => self.buy = self.buy.saturating_add(weight),
            Action::Sell => self.sell = self.sell.saturating_add(weight),
            Action::Neutral => self.neutral = self.neutral.saturating_add(weight),
        }
    }

    pub fn get(&self, action: Action) -> u32 {
        match action {
            Action::Buy => self.buy,
            Action::Sell => self.sell,
            Action::Neutral => self.neutral,
        }
    }

    /// The action holding the strictly highest tally, or None on any tie for the maximum.
    pub fn unique_winner(&self) -> Option<Action> {
        let max = self.buy.max(self.sell).max(self.neutral);
        let mut winners = [Action::Buy, Action::Sell, Action::Neutral]
            .into_iter()
            .filter(|action| self.get(*action) == max);
        match (winners.next(), winners.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }
}

/// Combined recommendation for one security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    pub status: StatusTag,
    pub description: String,
    pub tally: VoteTally,
}

impl VoteResult {
    /// Human-facing label, e.g. "Buy (strong)".
    pub fn label(&self) -> String {
        match self.strength {
            Some(strength) => format!("{} ({})", self.action, strength),
            None => self.action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_winner_detects_ties() {
        let tally = VoteTally {
            buy: 2,
            sell: 2,
            neutral: 0,
        };
        assert_eq!(tally.unique_winner(), None);

        let empty = VoteTally::default();
        assert_eq!(empty.unique_winner(), None);

        let neutral = VoteTally {
            buy: 1,
            sell: 1,
            neutral: 2,
        };
        assert_eq!(neutral.unique_winner(), Some(Action::Neutral));
    }

    #[test]
    fn test_tally_saturates_instead_of_overflowing() {
        let mut tally = VoteTally::default();
        tally.add(Action::Buy, u32::MAX);
        tally.add(Action::Buy, 2);
        assert_eq!(tally.buy, u32::MAX);
        assert_eq!(tally.unique_winner(), Some(Action::Buy));
    }

    #[test]
    fn test_status_tag_serializes_snake_case() {
        let json = serde_json::to_string(&StatusTag::BuyStrong).unwrap();
        assert_eq!(json, "\"buy_strong\"");
        assert_eq!(StatusTag::from_vote(Action::Sell, None), StatusTag::SellWeak);
        assert_eq!(
            StatusTag::from_vote(Action::Neutral, Some(Strength::Strong)),
            StatusTag::Neutral
        );
    }

    #[test]
    fn test_bundle_signal_counts_ignore_adx() {
        let bundle = IndicatorBundle::new()
            .with(IndicatorReading::new(IndicatorKey::Rsi, 25.0, Action::Buy, "oversold"))
            .with(IndicatorReading::new(IndicatorKey::Ema, 101.0, Action::Sell, "below"))
            .with(IndicatorReading::new(IndicatorKey::Bb, 100.0, Action::Neutral, "middle"))
            .with(IndicatorReading::new(IndicatorKey::Adx, 31.0, Action::Neutral, "strong"));

        let counts = bundle.signal_counts();
        assert_eq!(counts.buy, 1);
        assert_eq!(counts.sell, 1);
        assert_eq!(counts.total, 3);
        assert!((bundle.adx() - 31.0).abs() < f64::EPSILON);
    }
}
