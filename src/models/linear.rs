//! Ordinary least squares regressor.
//!
//! A drop-in alternative to the network: deterministic, instant to train, and
//! monotone in every feature whose coefficient is positive.

use nalgebra::{DMatrix, DVector};
use tracing::info;

use crate::domain::{FEATURE_COUNT, Features, RegressorKind, TrainingExample};
use crate::error::AppError;
use crate::math::{Scaler, solve_least_squares};
use crate::models::regressor::{
    Regressor, TrainingReport, check_examples, check_features, design_matrices, training_rmse,
};

#[derive(Debug, Clone)]
struct Fitted {
    x_scaler: Scaler,
    /// Intercept first, then one coefficient per standardized feature.
    beta: DVector<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LinearRegressor {
    fitted: Option<Fitted>,
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted coefficients (intercept first), if trained.
    pub fn coefficients(&self) -> Option<Vec<f64>> {
        self.fitted.as_ref().map(|f| f.beta.iter().copied().collect())
    }
}

/// Prepend the intercept column.
fn with_intercept(x: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 { 1.0 } else { x[(i, j - 1)] }
    })
}

impl Regressor for LinearRegressor {
    fn kind(&self) -> RegressorKind {
        RegressorKind::Linear
    }

    fn train(&mut self, examples: &[TrainingExample]) -> Result<TrainingReport, AppError> {
        self.fitted = None;
        check_examples(examples)?;

        let (x_raw, y_raw) = design_matrices(examples);
        let x_scaler = Scaler::fit(&x_raw);
        let design = with_intercept(&x_scaler.transform(&x_raw));
        let y = DVector::from_iterator(y_raw.nrows(), y_raw.iter().copied());

        let beta = solve_least_squares(&design, &y)?;
        debug_assert_eq!(beta.len(), FEATURE_COUNT + 1);

        self.fitted = Some(Fitted { x_scaler, beta });
        let rmse = training_rmse(&*self, examples)?;
        info!(samples = examples.len(), rmse, "linear regressor trained");
        Ok(TrainingReport {
            samples: examples.len(),
            rmse,
        })
    }

    fn predict(&self, features: &Features) -> Result<f64, AppError> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| AppError::insufficient_data("regressor has not been trained."))?;
        check_features(features)?;

        let x = fitted.x_scaler.transform_row(features);
        let y = fitted.beta[0]
            + x.iter()
                .zip(fitted.beta.iter().skip(1))
                .map(|(a, b)| a * b)
                .sum::<f64>();
        if !y.is_finite() {
            return Err(AppError::numeric("non-finite regression output."));
        }
        Ok(y)
    }
}
