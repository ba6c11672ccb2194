//! Column standardization (z-scores).
//!
//! Areas are in the thousands and costs in the millions, while floors and
//! quality are single digits. Both regressors train on standardized columns
//! and map predictions back with the statistics captured at fit time.

use nalgebra::DMatrix;

/// Columns with a spread below this are treated as constant (scale 1).
const MIN_STD: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl Scaler {
    /// Capture per-column mean and population standard deviation.
    ///
    /// An empty matrix yields the identity scaling.
    pub fn fit(x: &DMatrix<f64>) -> Self {
        let n = x.nrows().max(1) as f64;

        let mut mean = Vec::with_capacity(x.ncols());
        let mut std = Vec::with_capacity(x.ncols());
        for col in x.column_iter() {
            let m = col.sum() / n;
            let var = col.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            let s = var.sqrt();
            mean.push(m);
            std.push(if s.is_finite() && s > MIN_STD { s } else { 1.0 });
        }
        Self { mean, std }
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - self.mean[j]) / self.std[j]
        })
    }

    pub fn transform_row(&self, row: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(1, row.len(), |_, j| (row[j] - self.mean[j]) / self.std[j])
    }

    /// Map a standardized value of column `j` back to original units.
    pub fn inverse(&self, j: usize, value: f64) -> f64 {
        value * self.std[j] + self.mean[j]
    }
}
