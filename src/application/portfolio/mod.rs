pub mod allocation_calculator;
pub mod clusters;
pub mod draft;
pub mod summary;
pub mod weight_aggregator;
pub mod weight_editor;

pub use allocation_calculator::allocate;
pub use clusters::{WeightClusters, cluster_by_weight};
pub use draft::{DraftHolding, PortfolioDraft};
pub use summary::{PortfolioSummary, summarize_allocation};
pub use weight_aggregator::{WeightAggregator, aggregate};
pub use weight_editor::set_weight;
