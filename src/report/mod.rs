//! Report module - enrichment, statistics and the two reporting stages

pub mod descriptive;
pub mod enrich;
pub mod insights;
pub mod stats;
pub mod summary;

pub use descriptive::*;
pub use enrich::*;
pub use insights::*;
pub use stats::*;
pub use summary::*;
