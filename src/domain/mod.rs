//! Domain types used throughout the estimator.
//!
//! This module defines:
//!
//! - catalog and history records as served by the web layer (`MaterialRecord`, `HistoricalProject`)
//! - request types before and after validation (`ProjectRequest`, `ProjectSpec`)
//! - estimate outputs (`CostBreakdown`, `EstimateResult`)
//! - training knobs (`TrainingConfig`, `RegressorKind`)

pub mod types;

pub use types::*;
