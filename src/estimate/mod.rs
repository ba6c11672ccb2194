//! Estimate orchestration.
//!
//! One request flows through:
//!
//! 1. validation (`ProjectRequest` -> `ProjectSpec`)
//! 2. the trained regressor (scalar estimate)
//! 3. the rule-based breakdown over the resolved materials
//! 4. reconciliation: the larger of the two totals wins
//! 5. the ±10% range and the advice list

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{EstimateResult, ProjectRequest, ProjectSpec};
use crate::error::AppError;
use crate::fit::EstimatorContext;
use crate::rules::{compute_breakdown, recommendations};

pub mod validate;

pub use validate::validate;

pub const RANGE_LOW_FACTOR: f64 = 0.9;
pub const RANGE_HIGH_FACTOR: f64 = 1.1;

/// Validate and price one request.
pub fn estimate(ctx: &EstimatorContext, request: &ProjectRequest) -> Result<EstimateResult, AppError> {
    let spec = validate(request)?;
    estimate_spec(ctx, &spec)
}

/// Price an already validated project.
pub fn estimate_spec(ctx: &EstimatorContext, spec: &ProjectSpec) -> Result<EstimateResult, AppError> {
    let regression_estimate = ctx.regressor()?.predict(&spec.features())?;
    if !regression_estimate.is_finite() {
        return Err(AppError::numeric(format!(
            "regressor returned {regression_estimate}"
        )));
    }

    let materials = ctx.catalog().resolve(&spec.selected_materials);
    let breakdown = compute_breakdown(spec.area, spec.floors, spec.quality, &materials);
    let breakdown_total = breakdown.total();

    let total_cost = regression_estimate.max(breakdown_total);
    if !total_cost.is_finite() || total_cost <= 0.0 {
        return Err(AppError::numeric(format!("estimate total is {total_cost}")));
    }
    debug!(
        regression = regression_estimate,
        breakdown = breakdown_total,
        total = total_cost,
        "reconciled estimate"
    );

    Ok(EstimateResult {
        total_cost,
        range_low: total_cost * RANGE_LOW_FACTOR,
        range_high: total_cost * RANGE_HIGH_FACTOR,
        breakdown,
        recommendations: recommendations(spec.area, spec.floors, spec.quality, total_cost),
        regression_estimate,
        breakdown_total,
    })
}

/// Price many requests against one shared context.
///
/// Results come back in input order. A failure in one request does not affect
/// the others, except that a training failure is reported by every request
/// that needed the model.
pub fn estimate_batch(
    ctx: &EstimatorContext,
    requests: &[ProjectRequest],
) -> Vec<Result<EstimateResult, AppError>> {
    requests.par_iter().map(|r| estimate(ctx, r)).collect()
}
