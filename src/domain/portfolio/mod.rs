pub mod outlook;
pub mod types;

pub use outlook::ReturnOutlook;
pub use types::{
    AggregationOutcome, AllocationResult, IndexContribution, PortfolioEntry, SecurityWeight,
    WEIGHT_TOLERANCE,
};
