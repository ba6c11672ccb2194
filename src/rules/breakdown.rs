//! Rule-based cost breakdown.
//!
//! Two independent contributions:
//!
//! - **materials**: each selected catalog item priced at an area-proportional
//!   quantity that depends on its category
//! - **base cost**: `area × rate × multiplier × floor factor`, split across
//!   seven trade buckets with fixed shares
//!
//! Note: the rate table and the multiplier table both encode quality, and both
//! are applied. A luxury build is therefore priced at `2500 × 2.0` per sq ft.

use crate::domain::{CostBreakdown, MaterialCategory, MaterialRecord, QualityTier};

/// Share of the base cost per trade bucket. Sums to 1.0.
pub const LABOR_SHARE: f64 = 0.25;
pub const FOUNDATION_SHARE: f64 = 0.15;
pub const STRUCTURE_SHARE: f64 = 0.35;
pub const FINISHING_SHARE: f64 = 0.15;
pub const ELECTRICAL_SHARE: f64 = 0.05;
pub const PLUMBING_SHARE: f64 = 0.03;
pub const CONTINGENCY_SHARE: f64 = 0.02;

/// Extra cost per additional floor, as a fraction of the single-floor cost.
pub const FLOOR_STEP: f64 = 0.3;

/// Rate (₹ per sq ft) and multiplier for a quality tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityRates {
    pub base_rate: f64,
    pub multiplier: f64,
}

impl QualityRates {
    pub fn for_tier(tier: QualityTier) -> Self {
        let (base_rate, multiplier) = match tier {
            QualityTier::Basic => (800.0, 0.8),
            QualityTier::Standard => (1200.0, 1.0),
            QualityTier::Premium => (1800.0, 1.4),
            QualityTier::Luxury => (2500.0, 2.0),
        };
        Self {
            base_rate,
            multiplier,
        }
    }

    /// Rates for a free-text tier label; unknown labels price as `standard`.
    pub fn for_label(label: &str) -> Self {
        Self::for_tier(QualityTier::from_label_or_standard(label))
    }

    pub fn per_sqft(&self) -> f64 {
        self.base_rate * self.multiplier
    }
}

/// Consumption per sq ft of built-up area, by material category.
pub fn quantity_factor(category: &MaterialCategory) -> f64 {
    match category {
        MaterialCategory::TilesAndFlooring => 1.2,
        MaterialCategory::PaintsAndFinishes => 0.5,
        MaterialCategory::BricksAndBlocks => 10.0,
        MaterialCategory::CementAndConcrete => 0.8,
        MaterialCategory::Other(_) => 0.1,
    }
}

pub fn floor_factor(floors: u32) -> f64 {
    1.0 + f64::from(floors.saturating_sub(1)) * FLOOR_STEP
}

/// Construction cost before materials.
pub fn base_cost(area: f64, floors: u32, quality: QualityTier) -> f64 {
    area * QualityRates::for_tier(quality).per_sqft() * floor_factor(floors)
}

/// Cost of the selected materials at estimated quantities.
pub fn materials_cost(area: f64, materials: &[&MaterialRecord]) -> f64 {
    materials
        .iter()
        .map(|m| m.unit_price * area * quantity_factor(&m.category))
        .sum()
}

/// Full eight-bucket breakdown.
pub fn compute_breakdown(
    area: f64,
    floors: u32,
    quality: QualityTier,
    materials: &[&MaterialRecord],
) -> CostBreakdown {
    let base = base_cost(area, floors, quality);
    CostBreakdown {
        materials: materials_cost(area, materials),
        labor: base * LABOR_SHARE,
        foundation: base * FOUNDATION_SHARE,
        structure: base * STRUCTURE_SHARE,
        finishing: base * FINISHING_SHARE,
        electrical: base * ELECTRICAL_SHARE,
        plumbing: base * PLUMBING_SHARE,
        contingencies: base * CONTINGENCY_SHARE,
    }
}
