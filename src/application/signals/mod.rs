pub mod adx;
pub mod indicator_analyzer;
pub mod signal_aggregator;
pub mod signal_board;

pub use adx::WilderAdx;
pub use indicator_analyzer::IndicatorAnalyzer;
pub use signal_aggregator::SignalAggregator;
pub use signal_board::{BoardMember, SecuritySignals, SecurityVote, SignalBoard, SignalGroup};
