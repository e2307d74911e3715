//! Z-score outlier removal

use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Mean and population standard deviation of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMoments {
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnMoments {
    /// Moments of a non-empty sample (population stddev, ddof = 0)
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Z-score of `x`; a constant column scores zero everywhere
    pub fn z_score(&self, x: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (x - self.mean) / self.std_dev
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Drop every row whose absolute z-score reaches `threshold` in any numeric
/// column.
///
/// Mean and stddev come only from rows with no missing value in any numeric
/// column. Missing cells are never scored, so a row with gaps is judged on
/// its present values alone.
pub fn remove_outliers(dataset: &mut Dataset, threshold: f64) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(StageKind::Outliers, SkipReason::EmptyDataset));
    }

    let numeric_cols = dataset.columns_of_kind(ColumnKind::Numeric);
    if numeric_cols.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::Outliers,
            SkipReason::NoEligibleColumns,
        ));
    }

    let incomplete = dataset.rows_with_missing(&numeric_cols)?;
    if incomplete.iter().all(|missing| *missing) {
        return Ok(StageReport::skipped(
            StageKind::Outliers,
            SkipReason::NoCompleteRows,
        ));
    }

    let initial_count = dataset.height();
    let mut keep = vec![true; initial_count];
    let mut degenerate = Vec::new();

    for col in &numeric_cols {
        let values = dataset.numeric_values(col)?;
        let basis: Vec<f64> = values
            .iter()
            .zip(&incomplete)
            .filter(|(_, missing)| !**missing)
            .filter_map(|(v, _)| *v)
            .collect();

        let Some(moments) = ColumnMoments::from_values(&basis) else {
            continue;
        };
        if moments.is_degenerate() {
            degenerate.push(col.clone());
            continue;
        }

        for (flag, value) in keep.iter_mut().zip(&values) {
            if let Some(x) = value {
                if moments.z_score(*x).abs() >= threshold {
                    *flag = false;
                }
            }
        }
        tracing::debug!(column = %col, mean = moments.mean, std_dev = moments.std_dev, "z-scores computed");
    }

    dataset.retain_rows(&keep)?;
    let dropped_count = initial_count - dataset.height();

    Ok(StageReport::applied(
        StageKind::Outliers,
        format!(
            "Outliers removed: {} row(s) with |z| >= {}. New shape: ({}, {}).",
            dropped_count,
            threshold,
            dataset.height(),
            dataset.width()
        ),
    )
    .with_rows_removed(dropped_count)
    .with_degenerate_columns(degenerate))
}
