//! Request validation.
//!
//! Runs before anything else touches the request. A rejected request never
//! reaches the regressor.

use crate::domain::{ProjectRequest, ProjectSpec, ProjectType, QualityTier};
use crate::error::AppError;

pub const MIN_AREA_SQFT: f64 = 100.0;
pub const MAX_AREA_SQFT: f64 = 10_000.0;

pub const AREA_OUT_OF_RANGE: &str = "Please enter area between 100-10000 sq ft";
pub const NO_MATERIALS: &str = "Please select at least one material";

/// Check a raw request and turn it into a `ProjectSpec`.
///
/// Checks run in a fixed order and the first failure wins: project type,
/// area, floors, quality, material selection.
pub fn validate(request: &ProjectRequest) -> Result<ProjectSpec, AppError> {
    let project_type: ProjectType = request.project_type.parse().map_err(AppError::Validation)?;

    let area = request.area;
    if !area.is_finite() || !(MIN_AREA_SQFT..=MAX_AREA_SQFT).contains(&area) {
        return Err(AppError::validation(AREA_OUT_OF_RANGE));
    }

    let floors = u32::try_from(request.floors)
        .ok()
        .filter(|&f| f >= 1)
        .ok_or_else(|| {
            AppError::validation(format!("Floors must be at least 1 (got {}).", request.floors))
        })?;

    let quality: QualityTier = request.quality.parse().map_err(AppError::Validation)?;

    if request.selected_materials.is_empty() {
        return Err(AppError::validation(NO_MATERIALS));
    }
    let selected_materials = material_ids(&request.selected_materials)?;

    Ok(ProjectSpec {
        project_type,
        area,
        floors,
        quality,
        selected_materials,
    })
}

/// Convert ids to catalog keys, keeping the first occurrence of each.
fn material_ids(raw: &[i64]) -> Result<Vec<u32>, AppError> {
    let mut ids: Vec<u32> = Vec::with_capacity(raw.len());
    for &id in raw {
        let id = u32::try_from(id)
            .map_err(|_| AppError::validation(format!("Invalid material id {id}.")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
