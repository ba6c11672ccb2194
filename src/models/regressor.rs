//! The regression strategy seam.
//!
//! The estimator only ever calls `train` and `predict`, so any model that maps
//! a 4-feature vector to a cost can sit behind this trait.

use nalgebra::DMatrix;

use crate::domain::{FEATURE_COUNT, Features, RegressorKind, TrainingConfig, TrainingExample};
use crate::error::AppError;
use crate::models::{LinearRegressor, MlpRegressor};

/// Summary of one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub samples: usize,
    /// Root mean squared error over the training batch, in rupees.
    pub rmse: f64,
}

pub trait Regressor: Send + Sync {
    fn kind(&self) -> RegressorKind;

    /// Fit from scratch, discarding any previous weights.
    fn train(&mut self, examples: &[TrainingExample]) -> Result<TrainingReport, AppError>;

    fn predict(&self, features: &Features) -> Result<f64, AppError>;
}

/// Construct the configured strategy (untrained).
pub fn build_regressor(config: &TrainingConfig) -> Box<dyn Regressor> {
    match config.regressor {
        RegressorKind::Mlp => Box::new(MlpRegressor::new(config)),
        RegressorKind::Linear => Box::new(LinearRegressor::new()),
    }
}

/// Split examples into an `n × 4` feature matrix and an `n × 1` target column.
pub fn design_matrices(examples: &[TrainingExample]) -> (DMatrix<f64>, DMatrix<f64>) {
    let n = examples.len();
    let x = DMatrix::from_fn(n, FEATURE_COUNT, |i, j| examples[i].features[j]);
    let y = DMatrix::from_fn(n, 1, |i, _| examples[i].target);
    (x, y)
}

/// Reject empty batches and non-finite rows before any fitting starts.
pub fn check_examples(examples: &[TrainingExample]) -> Result<(), AppError> {
    if examples.is_empty() {
        return Err(AppError::insufficient_data("no training examples."));
    }
    let bad = examples
        .iter()
        .position(|e| !(e.target.is_finite() && e.features.iter().all(|v| v.is_finite())));
    if let Some(idx) = bad {
        return Err(AppError::insufficient_data(format!(
            "training example {idx} has non-finite values."
        )));
    }
    Ok(())
}

pub fn check_features(features: &Features) -> Result<(), AppError> {
    if features.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AppError::numeric(format!("non-finite feature vector {features:?}.")))
    }
}

/// Training-set RMSE of a fitted model.
pub fn training_rmse<R: Regressor + ?Sized>(
    model: &R,
    examples: &[TrainingExample],
) -> Result<f64, AppError> {
    let mut sse = 0.0;
    for e in examples {
        let diff = model.predict(&e.features)? - e.target;
        sse += diff * diff;
    }
    Ok((sse / examples.len().max(1) as f64).sqrt())
}
