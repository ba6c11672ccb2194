//! Application error type.
//!
//! Every fallible operation in the crate returns `AppError`. The binary maps
//! each variant to a process exit code:
//!
//! - `2`: bad input (validation, unreadable data, unknown material)
//! - `3`: not enough data to train or predict
//! - `4`: numeric failure during training or prediction

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The project request is malformed or out of range.
    #[error("{0}")]
    Validation(String),

    /// The regressor has nothing to learn from, or was never trained.
    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    /// A computation produced a non-finite value.
    #[error("numeric error: {0}")]
    Numeric(String),

    /// Material or project data could not be read or decoded.
    #[error("{0}")]
    Data(String),

    /// Strict catalog lookup for an id that is not in the catalog.
    #[error("material {0} not found")]
    MaterialNotFound(u32),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::Numeric(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(_) | AppError::Data(_) | AppError::MaterialNotFound(_) => 2,
            AppError::InsufficientData(_) => 3,
            AppError::Numeric(_) => 4,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
