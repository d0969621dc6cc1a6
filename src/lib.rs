//! # Fight Outcomes
//!
//! Fight outcome statistics by weight division. Loads a CSV of per-division
//! outcome counts and derives KO/TKO, submission, decision and "other" rates.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (records, derived metrics, datasets)
//! - **calculate**: Derived metrics computation
//! - **ingest**: CSV intake and count-consistency checks
//! - **dashboard**: Table, chart and selection views over a loaded dataset
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod models;

pub use models::*;
