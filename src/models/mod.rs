//! Core data models for fight outcome statistics.

mod dataset;
mod ids;
mod metrics;
mod record;

pub use dataset::*;
pub use ids::*;
pub use metrics::*;
pub use record::*;
