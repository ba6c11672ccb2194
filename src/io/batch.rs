//! Batch request input and batch result output.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{EstimateResult, ProjectRequest};
use crate::error::AppError;

/// One line of batch output. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord<'a> {
    pub request: &'a ProjectRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a EstimateResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> BatchRecord<'a> {
    pub fn new(request: &'a ProjectRequest, outcome: &'a Result<EstimateResult, AppError>) -> Self {
        match outcome {
            Ok(result) => Self {
                request,
                result: Some(result),
                error: None,
            },
            Err(e) => Self {
                request,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Read a JSON array of requests.
pub fn read_requests(path: &Path) -> Result<Vec<ProjectRequest>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data(format!("Failed to open batch input '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::data(format!("Invalid batch input '{}': {e}", path.display()))
    })
}

pub fn write_batch_json(
    path: &Path,
    rows: &[(ProjectRequest, Result<EstimateResult, AppError>)],
) -> Result<(), AppError> {
    let records: Vec<BatchRecord<'_>> = rows.iter().map(|(req, out)| BatchRecord::new(req, out)).collect();
    let file = File::create(path).map_err(|e| {
        AppError::data(format!("Failed to create batch output '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, &records)
        .map_err(|e| AppError::data(format!("Failed to write batch output: {e}")))?;
    Ok(())
}
