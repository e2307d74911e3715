//! Error types for loading, cleaning and saving datasets.
//!
//! Only conditions that stop a run are errors. A stage that finds nothing to
//! do (empty dataset, absent column, zero variance) reports that through its
//! [`StageReport`](crate::pipeline::StageReport) instead.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while running the cleaning pipeline.
#[derive(Debug, Error)]
pub enum PrepError {
    /// The input table does not exist.
    #[error("input file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The input exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a parseable comma-delimited table.
    #[error("failed to parse CSV {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A pipeline configuration file is invalid.
    #[error("invalid pipeline config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PrepError>;
