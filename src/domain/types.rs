//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - loaded from the web layer's JSON data (materials, projects)
//! - passed through training and estimation in memory
//! - exported to JSON/CSV

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of regression features: `[area, floors, quality_index, material_count]`.
pub const FEATURE_COUNT: usize = 4;

/// Regression input vector.
pub type Features = [f64; FEATURE_COUNT];

/// Finish quality tier selected by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Basic,
    Standard,
    Premium,
    Luxury,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Basic,
        QualityTier::Standard,
        QualityTier::Premium,
        QualityTier::Luxury,
    ];

    /// Fixed ordinal used as the regression feature (basic=0 .. luxury=3).
    pub fn index(self) -> u8 {
        match self {
            QualityTier::Basic => 0,
            QualityTier::Standard => 1,
            QualityTier::Premium => 2,
            QualityTier::Luxury => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Basic => "basic",
            QualityTier::Standard => "standard",
            QualityTier::Premium => "premium",
            QualityTier::Luxury => "luxury",
        }
    }

    /// Lenient parse used by the rate tables: unknown labels fall back to `Standard`.
    pub fn from_label_or_standard(label: &str) -> Self {
        label.parse().unwrap_or(QualityTier::Standard)
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(QualityTier::Basic),
            "standard" => Ok(QualityTier::Standard),
            "premium" => Ok(QualityTier::Premium),
            "luxury" => Ok(QualityTier::Luxury),
            other => Err(format!(
                "Unknown quality tier '{other}' (expected basic, standard, premium or luxury)."
            )),
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of construction project. Carried through to reports; it does not
/// change the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Residential,
    Commercial,
    Industrial,
    Renovation,
    Interior,
}

impl ProjectType {
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
            ProjectType::Industrial => "industrial",
            ProjectType::Renovation => "renovation",
            ProjectType::Interior => "interior",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(ProjectType::Residential),
            "commercial" => Ok(ProjectType::Commercial),
            "industrial" => Ok(ProjectType::Industrial),
            "renovation" => Ok(ProjectType::Renovation),
            "interior" => Ok(ProjectType::Interior),
            "" => Err("Project type is required.".to_string()),
            other => Err(format!("Unknown project type '{other}'.")),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog category of a material.
///
/// The four named categories drive quantity estimation; anything else is kept
/// verbatim and uses the default consumption factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialCategory {
    TilesAndFlooring,
    PaintsAndFinishes,
    BricksAndBlocks,
    CementAndConcrete,
    Other(String),
}

impl MaterialCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MaterialCategory::TilesAndFlooring => "Tiles & Flooring",
            MaterialCategory::PaintsAndFinishes => "Paints & Finishes",
            MaterialCategory::BricksAndBlocks => "Bricks & Blocks",
            MaterialCategory::CementAndConcrete => "Cement & Concrete",
            MaterialCategory::Other(name) => name,
        }
    }
}

impl From<String> for MaterialCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Tiles & Flooring" => MaterialCategory::TilesAndFlooring,
            "Paints & Finishes" => MaterialCategory::PaintsAndFinishes,
            "Bricks & Blocks" => MaterialCategory::BricksAndBlocks,
            "Cement & Concrete" => MaterialCategory::CementAndConcrete,
            _ => MaterialCategory::Other(value),
        }
    }
}

impl From<&str> for MaterialCategory {
    fn from(value: &str) -> Self {
        MaterialCategory::from(value.to_string())
    }
}

impl From<MaterialCategory> for String {
    fn from(value: MaterialCategory) -> Self {
        match value {
            MaterialCategory::Other(name) => name,
            named => named.as_str().to_string(),
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry as served by the web layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: u32,
    pub name: String,
    pub category: MaterialCategory,
    pub unit: String,
    /// Price per `unit`, in rupees.
    #[serde(rename = "price", alias = "unitPrice")]
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A past project showcased on the site.
///
/// Only the free-text `summary` and `budget` fields matter for training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub budget: String,
}

/// One row of the regression training batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingExample {
    pub features: Features,
    pub target: f64,
}

/// An estimate request exactly as received, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(alias = "project_type")]
    pub project_type: String,
    pub area: f64,
    pub floors: i64,
    pub quality: String,
    #[serde(default, alias = "selected_materials")]
    pub selected_materials: Vec<i64>,
}

/// A validated estimate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSpec {
    pub project_type: ProjectType,
    /// Built-up area in square feet, within `[100, 10000]`.
    pub area: f64,
    pub floors: u32,
    pub quality: QualityTier,
    /// Selected catalog ids, de-duplicated, in first-seen order. Never empty.
    pub selected_materials: Vec<u32>,
}

impl ProjectSpec {
    /// Regression input for this project.
    pub fn features(&self) -> Features {
        [
            self.area,
            f64::from(self.floors),
            f64::from(self.quality.index()),
            self.selected_materials.len() as f64,
        ]
    }
}

/// Cost split across the fixed estimate categories (rupees).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: f64,
    pub labor: f64,
    pub foundation: f64,
    pub structure: f64,
    pub finishing: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub contingencies: f64,
}

impl CostBreakdown {
    /// Category names in display order.
    pub const CATEGORIES: [&'static str; 8] = [
        "materials",
        "labor",
        "foundation",
        "structure",
        "finishing",
        "electrical",
        "plumbing",
        "contingencies",
    ];

    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("materials", self.materials),
            ("labor", self.labor),
            ("foundation", self.foundation),
            ("structure", self.structure),
            ("finishing", self.finishing),
            ("electrical", self.electrical),
            ("plumbing", self.plumbing),
            ("contingencies", self.contingencies),
        ]
    }

    /// Sum of all eight buckets.
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    /// Sum of the base-cost buckets (everything except materials).
    pub fn base_total(&self) -> f64 {
        self.total() - self.materials
    }
}

/// Final estimate returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub total_cost: f64,
    pub range_low: f64,
    pub range_high: f64,
    pub breakdown: CostBreakdown,
    pub recommendations: Vec<String>,
    /// Scalar produced by the regressor.
    pub regression_estimate: f64,
    /// Sum of the rule-based breakdown.
    pub breakdown_total: f64,
}

/// Which regression strategy backs the scalar estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegressorKind {
    /// Two hidden layers (64, 32), ReLU, Adam.
    Mlp,
    /// Ordinary least squares on standardized features.
    Linear,
}

/// Training knobs, derived from CLI flags (plus defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub regressor: RegressorKind,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub hidden: (usize, usize),
    pub synthetic_count: usize,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            regressor: RegressorKind::Mlp,
            epochs: 100,
            batch_size: 32,
            learning_rate: 0.01,
            hidden: (64, 32),
            synthetic_count: 100,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_index_is_fixed() {
        let idx: Vec<u8> = QualityTier::ALL.iter().map(|q| q.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unknown_quality_label_falls_back_to_standard() {
        assert_eq!(QualityTier::from_label_or_standard("gold"), QualityTier::Standard);
        assert_eq!(QualityTier::from_label_or_standard("Luxury"), QualityTier::Luxury);
    }

    #[test]
    fn material_category_round_trips_through_strings() {
        let cat: MaterialCategory = "Bricks & Blocks".into();
        assert_eq!(cat, MaterialCategory::BricksAndBlocks);
        let other: MaterialCategory = "Steel & TMT".into();
        assert_eq!(String::from(other), "Steel & TMT");
    }

    #[test]
    fn material_record_reads_web_layer_json() {
        let json = r#"{"id": 3, "name": "Vitrified Tile", "category": "Tiles & Flooring",
                       "price": 55.5, "unit": "sq ft", "image": "tile.jpg"}"#;
        let m: MaterialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 3);
        assert_eq!(m.category, MaterialCategory::TilesAndFlooring);
        assert!((m.unit_price - 55.5).abs() < 1e-12);
    }

    #[test]
    fn request_accepts_camel_case_keys() {
        let json = r#"{"projectType": "residential", "area": 1200, "floors": 2,
                       "quality": "premium", "selectedMaterials": [1, 2]}"#;
        let r: ProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.project_type, "residential");
        assert_eq!(r.selected_materials, vec![1, 2]);
    }

    #[test]
    fn breakdown_base_total_excludes_materials() {
        let b = CostBreakdown {
            materials: 10.0,
            labor: 1.0,
            foundation: 2.0,
            ..Default::default()
        };
        assert!((b.total() - 13.0).abs() < 1e-12);
        assert!((b.base_total() - 3.0).abs() < 1e-12);
    }
}
