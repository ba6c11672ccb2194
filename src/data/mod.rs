//! Data inputs: web-layer sources, the material catalog, and training samples.

pub mod catalog;
pub mod sample;
pub mod source;

pub use catalog::MaterialCatalog;
pub use sample::{TrainingSet, build_training_set, training_rng};
pub use source::{ApiEnvelope, DataSource, FileSource, HttpSource, source_from_settings};
