//! Shared setup used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! data source -> catalog + history -> estimator context
//!
//! The subcommands can then focus on presentation (text vs JSON).

use std::path::Path;

use crate::data::{MaterialCatalog, source_from_settings};
use crate::domain::TrainingConfig;
use crate::error::AppError;
use crate::fit::EstimatorContext;

/// Where the web layer's data comes from.
#[derive(Debug, Clone, Copy)]
pub struct DataSettings<'a> {
    pub data_dir: &'a Path,
    pub api_url: Option<&'a str>,
}

/// Load catalog and history and wrap them in an (untrained) context.
pub fn build_context(settings: DataSettings<'_>, config: TrainingConfig) -> Result<EstimatorContext, AppError> {
    let source = source_from_settings(settings.data_dir, settings.api_url);
    EstimatorContext::from_source(source.as_ref(), config)
}

/// Load only the catalog; used by the listing commands.
pub fn load_catalog(settings: DataSettings<'_>) -> Result<MaterialCatalog, AppError> {
    let source = source_from_settings(settings.data_dir, settings.api_url);
    Ok(MaterialCatalog::new(source.materials()?))
}
