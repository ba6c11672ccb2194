//! Regression strategies for the scalar cost estimate.
//!
//! Both models implement `Regressor`, so the estimator can swap one for the
//! other without touching the rest of the pipeline.

pub mod linear;
pub mod mlp;
pub mod regressor;

pub use linear::LinearRegressor;
pub use mlp::MlpRegressor;
pub use regressor::{Regressor, TrainingReport, build_regressor};
