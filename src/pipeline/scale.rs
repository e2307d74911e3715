//! Numeric feature scaling

use super::config::ScaleMethod;
use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::outliers::ColumnMoments;
use super::report::{SkipReason, StageKind, StageReport};

/// Rescale every numeric column with parameters taken from its current
/// non-missing values.
///
/// Constant columns (zero stddev or zero range) map to 0. Missing cells stay
/// missing and other column kinds are untouched.
pub fn scale_numeric(dataset: &mut Dataset, method: ScaleMethod) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(StageKind::Scale, SkipReason::EmptyDataset));
    }

    let numeric_cols = dataset.columns_of_kind(ColumnKind::Numeric);
    if numeric_cols.is_empty() {
        return Ok(StageReport::skipped(StageKind::Scale, SkipReason::NoEligibleColumns));
    }

    let mut scaled_values = 0;
    let mut degenerate = Vec::new();

    for col in &numeric_cols {
        let values = dataset.numeric_values(col)?;
        let present: Vec<f64> = values.iter().flatten().copied().collect();

        let Some(scaler) = Scaler::fit(method, &present) else {
            continue;
        };
        if scaler.is_degenerate() {
            degenerate.push(col.clone());
        }

        let scaled: Vec<Option<f64>> = values.iter().map(|v| v.map(|x| scaler.apply(x))).collect();
        dataset.replace_numeric(col, scaled)?;
        scaled_values += present.len();
    }
    tracing::debug!(%method, columns = numeric_cols.len(), ?degenerate, "numeric columns scaled");

    Ok(StageReport::applied(
        StageKind::Scale,
        format!(
            "Data scaled using {}: {} column(s).",
            method,
            numeric_cols.len()
        ),
    )
    .with_values_changed(scaled_values)
    .with_degenerate_columns(degenerate))
}

/// Fitted parameters of one column's scaling formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaler {
    Standard(ColumnMoments),
    MinMax { min: f64, max: f64 },
}

impl Scaler {
    /// Derive parameters from the present values; `None` when there are none
    pub fn fit(method: ScaleMethod, values: &[f64]) -> Option<Self> {
        match method {
            ScaleMethod::Standard => ColumnMoments::from_values(values).map(Scaler::Standard),
            ScaleMethod::MinMax => {
                let min = values.iter().copied().reduce(f64::min)?;
                let max = values.iter().copied().reduce(f64::max)?;
                Some(Scaler::MinMax { min, max })
            }
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Scaler::Standard(moments) => moments.z_score(x),
            Scaler::MinMax { min, max } => {
                if max == min {
                    0.0
                } else {
                    (x - min) / (max - min)
                }
            }
        }
    }

    pub fn is_degenerate(&self) -> bool {
        match self {
            Scaler::Standard(moments) => moments.is_degenerate(),
            Scaler::MinMax { min, max } => max == min,
        }
    }
}
