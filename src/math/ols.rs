//! Least squares via SVD.
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! SVD handles tall and rank-deficient designs (a constant feature column, or
//! a batch made only of historical placeholders) by returning the
//! minimum-norm solution. `QR::solve` panics on non-square input.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Singular-value cutoffs tried in order until one yields a finite solution.
const TOLERANCES: [f64; 3] = [1e-10, 1e-8, 1e-6];

pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    if x.nrows() != y.len() {
        return Err(AppError::numeric(format!(
            "design has {} rows but target has {}.",
            x.nrows(),
            y.len()
        )));
    }

    let svd = x.clone().svd(true, true);
    TOLERANCES
        .iter()
        .filter_map(|&tol| svd.solve(y, tol).ok())
        .find(|beta| beta.iter().all(|v| v.is_finite()))
        .ok_or_else(|| AppError::numeric("least squares system is ill-conditioned."))
}
