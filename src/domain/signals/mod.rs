pub mod policy;
pub mod types;

pub mod indicator_config;

pub use indicator_config::IndicatorConfig;
pub use policy::{MAX_VOTE_WEIGHT, SignalPolicy, SignalPolicyError, VoteWeights};
pub use types::{
    Action, IndicatorBundle, IndicatorKey, IndicatorReading, IndicatorReadings, IndicatorStatus,
    Recommendation, SignalCounts, StatusTag, Strength, VoteResult, VoteTally,
};
