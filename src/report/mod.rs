//! Report module - summarizing and exporting cleaning results

pub mod run_export;
pub mod summary;

pub use run_export::*;
pub use summary::*;
