//! Input/output helpers.
//!
//! - batch request input + batch results (`batch`)
//! - breakdown CSV export (`export`)
//! - estimate report JSON read/write (`report`)

pub mod batch;
pub mod export;
pub mod report;

pub use batch::*;
pub use export::*;
pub use report::*;
