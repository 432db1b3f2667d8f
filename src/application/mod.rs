// Portfolio construction: index merge, weight edits, allocation
pub mod portfolio;

// Technical signals: indicator readings, voting, grouping
pub mod signals;
