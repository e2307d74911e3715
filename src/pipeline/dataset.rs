//! In-memory table with a typed column schema
//!
//! A [`Dataset`] owns a polars `DataFrame` plus one [`ColumnKind`] per column.
//! Kinds are detected once when the dataset is built and re-derived whenever
//! the column set changes, so stages never re-infer types on their own.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Logical kind of a column, as seen by the cleaning stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Floating-point values (integers are widened on load)
    Numeric,
    /// Free text / category labels
    Categorical,
    Boolean,
    /// Anything else (dates, nested types); stages leave these alone
    Unknown,
}

impl ColumnKind {
    /// Map a polars dtype onto a column kind
    pub fn from_dtype(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            return ColumnKind::Numeric;
        }
        match dtype {
            DataType::String => ColumnKind::Categorical,
            DataType::Boolean => ColumnKind::Boolean,
            _ => ColumnKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape and missing-value count handed to the sink before and after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
}

/// Rectangular table of named, kinded columns
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Dataset {
    /// Build a dataset from a DataFrame, running column-kind detection.
    ///
    /// Numeric columns are widened to `Float64` and any NaN is turned into
    /// the missing marker (null), so every numeric stage sees one
    /// representation of "missing".
    pub fn new(frame: DataFrame) -> Result<Self> {
        let mut frame = frame;

        let numeric: Vec<PlSmallStr> = frame
            .get_columns()
            .iter()
            .filter(|col| col.dtype().is_primitive_numeric())
            .map(|col| col.name().clone())
            .collect();

        for name in numeric {
            let casted = frame.column(name.as_str())?.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = casted
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect();
            frame.with_column(Series::new(name, values))?;
        }

        Ok(Self::from_normalized(frame))
    }

    fn from_normalized(frame: DataFrame) -> Self {
        let kinds = frame
            .get_columns()
            .iter()
            .map(|col| ColumnKind::from_dtype(col.dtype()))
            .collect();
        Self { frame, kinds }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// True when there are no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Column names paired with their detected kinds, in column order
    pub fn schema(&self) -> Vec<(String, ColumnKind)> {
        self.column_names()
            .into_iter()
            .zip(self.kinds.iter().copied())
            .collect()
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.frame
            .get_column_index(name)
            .and_then(|idx| self.kinds.get(idx).copied())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// Names of all columns of the given kind, in column order
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.schema()
            .into_iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name)
            .collect()
    }

    /// Total number of missing cells across all columns
    pub fn missing_count(&self) -> usize {
        self.frame.get_columns().iter().map(|c| c.null_count()).sum()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.height(),
            columns: self.width(),
            missing_values: self.missing_count(),
        }
    }

    /// Values of a numeric column, `None` for missing
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.frame.column(name)?;
        Ok(column.f64()?.into_iter().collect())
    }

    /// Values of a categorical column, `None` for missing
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.frame.column(name)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Per-row flag: true when the row holds a missing value in any of `columns`
    pub fn rows_with_missing(&self, columns: &[String]) -> Result<Vec<bool>> {
        let mut flags = vec![false; self.height()];
        for name in columns {
            let column = self.frame.column(name)?;
            if column.null_count() == 0 {
                continue;
            }
            let nulls = column.as_materialized_series().is_null();
            for (flag, is_null) in flags.iter_mut().zip(&nulls) {
                *flag |= is_null.unwrap_or(false);
            }
        }
        Ok(flags)
    }

    /// Overwrite a numeric column in place, keeping its position
    pub(crate) fn replace_numeric(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        self.frame.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Overwrite a categorical column in place, keeping its position
    pub(crate) fn replace_text(&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        self.frame.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Keep only the rows whose flag is true; row order is preserved
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.frame = self.frame.filter(&mask)?;
        Ok(())
    }

    /// Swap in a frame with a different column set and re-derive all kinds
    pub(crate) fn replace_frame(&mut self, frame: DataFrame) {
        *self = Self::from_normalized(frame);
    }
}
