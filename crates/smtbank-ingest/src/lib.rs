//! Ingestion of historical evaluation results into the benchmark
//! database: era-specific adapters normalize raw records into a common
//! form, the driver resolves identities and writes them.

pub mod adapters;
pub mod driver;
pub mod normalize;
pub mod record;
