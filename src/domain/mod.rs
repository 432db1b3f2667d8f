// Market data primitives (candles)
pub mod market;

// Portfolio domain (weights, entries, allocations)
pub mod portfolio;

// Technical signal domain (readings, votes, policy)
pub mod signals;

// Domain-specific error types
pub mod errors;
