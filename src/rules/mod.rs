//! Deterministic pricing rules: the category breakdown and the advice list.

pub mod breakdown;
pub mod recommend;

pub use breakdown::{QualityRates, base_cost, compute_breakdown, materials_cost};
pub use recommend::recommendations;
