//! Read/write estimate report JSON files.
//!
//! A report is the portable record of one estimate:
//! - the request exactly as it was submitted
//! - the full result (totals, range, breakdown, advice)
//! - when and by what it was generated

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EstimateResult, ProjectRequest};
use crate::error::AppError;

pub const TOOL_NAME: &str = "buildcost";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub request: ProjectRequest,
    pub result: EstimateResult,
}

impl EstimateReport {
    pub fn new(request: ProjectRequest, result: EstimateResult) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Utc::now(),
            request,
            result,
        }
    }
}

pub fn write_report_json(path: &Path, report: &EstimateReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::data(format!("Failed to create report JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::data(format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

pub fn read_report_json(path: &Path) -> Result<EstimateReport, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data(format!("Failed to open report JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| AppError::data(format!("Invalid report JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::CostBreakdown;

    #[test]
    fn report_survives_a_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let request = ProjectRequest {
            project_type: "commercial".to_string(),
            area: 2500.0,
            floors: 3,
            quality: "premium".to_string(),
            selected_materials: vec![2, 4],
        };
        let result = EstimateResult {
            total_cost: 9_450_000.0,
            range_low: 8_505_000.0,
            range_high: 10_395_000.0,
            breakdown: CostBreakdown {
                labor: 2_362_500.0,
                ..CostBreakdown::default()
            },
            recommendations: vec!["Get multiple contractor quotes before finalizing".to_string()],
            regression_estimate: 4_000_000.0,
            breakdown_total: 9_450_000.0,
        };
        let report = EstimateReport::new(request, result);

        write_report_json(&path, &report).unwrap();
        let back = read_report_json(&path).unwrap();
        assert_eq!(back, report);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["tool"], "buildcost");
        assert_eq!(raw["request"]["projectType"], "commercial");
        assert!(raw["result"]["totalCost"].is_number());
    }

    #[test]
    fn missing_report_is_a_data_error() {
        let err = read_report_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }
}
