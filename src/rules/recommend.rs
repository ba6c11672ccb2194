//! Advisory text attached to every estimate.

use crate::domain::QualityTier;

pub const LARGE_AREA_SQFT: f64 = 3000.0;
pub const MULTI_STORY_FLOORS: u32 = 2;
pub const HIGH_VALUE_TOTAL: f64 = 5_000_000.0;

pub const PHASED_CONSTRUCTION: &str =
    "Consider phased construction for large areas to manage cash flow";
pub const STRUCTURAL_ENGINEERING: &str =
    "Multi-story construction requires additional structural engineering";
pub const SPECIALIZED_CONTRACTORS: &str = "Luxury finishes may require specialized contractors";
pub const SUBSIDIES_AND_LOANS: &str =
    "Consider government subsidies or housing loans for high-value projects";
pub const MULTIPLE_QUOTES: &str = "Get multiple contractor quotes before finalizing";
pub const CONTINGENCY_BUFFER: &str = "Include 5-10% contingency for unexpected costs";

/// Threshold rules first, then the two generic tips. Order is fixed.
pub fn recommendations(area: f64, floors: u32, quality: QualityTier, total_cost: f64) -> Vec<String> {
    let mut out = Vec::new();

    if area > LARGE_AREA_SQFT {
        out.push(PHASED_CONSTRUCTION);
    }
    if floors > MULTI_STORY_FLOORS {
        out.push(STRUCTURAL_ENGINEERING);
    }
    if quality == QualityTier::Luxury {
        out.push(SPECIALIZED_CONTRACTORS);
    }
    if total_cost > HIGH_VALUE_TOTAL {
        out.push(SUBSIDIES_AND_LOANS);
    }
    out.push(MULTIPLE_QUOTES);
    out.push(CONTINGENCY_BUFFER);

    out.into_iter().map(str::to_string).collect()
}
