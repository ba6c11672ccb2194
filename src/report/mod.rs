//! Reporting utilities: rupee formatting and terminal summaries.

pub mod format;

pub use format::*;
