pub mod ingest;
pub mod observability;
