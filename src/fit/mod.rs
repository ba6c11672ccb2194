//! Training orchestration.
//!
//! Responsibilities:
//!
//! - build the training batch (history + synthetic)
//! - train the configured regressor lazily, once per session
//! - hand the fitted model to concurrent estimate requests

pub mod context;

pub use context::*;
