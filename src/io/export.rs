//! Export an estimate breakdown to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::EstimateResult;
use crate::error::AppError;

/// Write `category,amount` rows followed by a `total` row.
///
/// The total row carries the reconciled estimate, which can exceed the sum of
/// the category rows when the regressor wins.
pub fn write_breakdown_csv(path: &Path, result: &EstimateResult) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::data(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "category,amount")
        .map_err(|e| AppError::data(format!("Failed to write export CSV header: {e}")))?;

    for (name, amount) in result.breakdown.entries() {
        writeln!(file, "{name},{amount:.2}")
            .map_err(|e| AppError::data(format!("Failed to write export CSV row: {e}")))?;
    }
    writeln!(file, "total,{:.2}", result.total_cost)
        .map_err(|e| AppError::data(format!("Failed to write export CSV row: {e}")))?;

    Ok(())
}
