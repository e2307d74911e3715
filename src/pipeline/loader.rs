//! Dataset loading and saving for comma-delimited tables
//!
//! The first line is the header. An empty field is read as the missing
//! marker and missing cells are written back as empty fields.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use super::dataset::Dataset;
use super::error::{PrepError, Result};

/// Load a CSV file into a [`Dataset`], detecting column kinds once.
///
/// `infer_schema_length` is the number of rows polars samples for dtype
/// inference; 0 means a full scan.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<Dataset> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PrepError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PrepError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    // polars refuses a zero-byte CSV; treat it as a table with no columns
    if metadata.len() == 0 {
        tracing::warn!(path = %path.display(), "input file is empty");
        return Dataset::new(DataFrame::empty());
    }

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| PrepError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| PrepError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let dataset = Dataset::new(df)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.height(),
        columns = dataset.width(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Write a dataset as CSV, replacing `path` atomically.
///
/// The table goes to a hidden sibling file first and is renamed over the
/// destination once fully written, so readers never see a partial file.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let staging = staging_path(path);

    let written = write_csv(dataset, &staging).and_then(|()| {
        std::fs::rename(&staging, path).map_err(|e| PrepError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    });

    if written.is_err() {
        let _ = std::fs::remove_file(&staging);
    } else {
        tracing::info!(
            path = %path.display(),
            rows = dataset.height(),
            columns = dataset.width(),
            "dataset saved"
        );
    }
    written
}

fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| PrepError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut frame = dataset.frame().clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)?;

    file.sync_all().map_err(|e| PrepError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.csv");
    parent.join(format!(".{}.tmp", file_name))
}
