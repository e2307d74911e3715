//! Missing value handling
//!
//! Two strategies:
//! - `drop` removes every row that holds a missing value in any column
//! - `fill` replaces numeric gaps with the column mean and categorical gaps
//!   with the column mode
//!
//! Fill statistics are taken once per column from its non-missing values and
//! then written to every gap in a single pass, so filled values never feed
//! back into the statistic.

use std::collections::HashMap;

use super::config::ImputeStrategy;
use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Apply the chosen missing-value strategy
pub fn handle_missing_values(
    dataset: &mut Dataset,
    strategy: ImputeStrategy,
) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(StageKind::Impute, SkipReason::EmptyDataset));
    }

    match strategy {
        ImputeStrategy::Drop => drop_incomplete_rows(dataset),
        ImputeStrategy::Fill => fill_missing_values(dataset),
    }
}

fn drop_incomplete_rows(dataset: &mut Dataset) -> Result<StageReport> {
    let initial_count = dataset.height();
    let incomplete = dataset.rows_with_missing(&dataset.column_names())?;
    let keep: Vec<bool> = incomplete.iter().map(|missing| !missing).collect();

    dataset.retain_rows(&keep)?;
    let dropped_count = initial_count - dataset.height();
    tracing::debug!(dropped_count, "incomplete rows dropped");

    Ok(StageReport::applied(
        StageKind::Impute,
        format!("Dropped {} rows with missing values.", dropped_count),
    )
    .with_rows_removed(dropped_count))
}

fn fill_missing_values(dataset: &mut Dataset) -> Result<StageReport> {
    let mut filled = 0;

    for col in dataset.columns_of_kind(ColumnKind::Numeric) {
        let values = dataset.numeric_values(&col)?;
        let gaps = values.iter().filter(|v| v.is_none()).count();
        if gaps == 0 {
            continue;
        }
        let Some(fill) = mean(values.iter().flatten().copied()) else {
            tracing::debug!(column = %col, "numeric column entirely missing, left unchanged");
            continue;
        };

        let imputed: Vec<Option<f64>> = values.into_iter().map(|v| v.or(Some(fill))).collect();
        dataset.replace_numeric(&col, imputed)?;
        tracing::debug!(column = %col, gaps, fill, "numeric gaps filled with mean");
        filled += gaps;
    }

    for col in dataset.columns_of_kind(ColumnKind::Categorical) {
        let values = dataset.text_values(&col)?;
        let gaps = values.iter().filter(|v| v.is_none()).count();
        if gaps == 0 {
            continue;
        }
        let Some(fill) = mode(values.iter().flatten().map(String::as_str)) else {
            tracing::debug!(column = %col, "categorical column has no mode, left unchanged");
            continue;
        };

        let imputed: Vec<Option<String>> = values
            .into_iter()
            .map(|v| v.or_else(|| Some(fill.clone())))
            .collect();
        dataset.replace_text(&col, imputed)?;
        tracing::debug!(column = %col, gaps, fill = %fill, "categorical gaps filled with mode");
        filled += gaps;
    }

    Ok(StageReport::applied(
        StageKind::Impute,
        format!("Missing values filled: {} value(s).", filled),
    )
    .with_values_changed(filled))
}

/// Arithmetic mean, `None` for an empty input
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Most frequent value; ties resolve to the lexicographically smallest
pub fn mode<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_val, a_count), (b_val, b_count)| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(value, _)| value.to_string())
}
