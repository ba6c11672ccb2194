//! Numeric utilities: least squares, standardization, and the Adam optimizer.

pub mod adam;
pub mod ols;
pub mod scaler;

pub use adam::*;
pub use ols::*;
pub use scaler::*;
