//! Logical integrity checks

use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Replace negative values of an age-like column with the missing marker.
///
/// A negative age is a data-entry error whose true value is unknown, so the
/// cell is blanked for imputation to recover later rather than clamped or
/// dropped.
pub fn fix_negative_values(dataset: &mut Dataset, column: &str) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::Integrity,
            SkipReason::EmptyDataset,
        ));
    }
    if dataset.kind_of(column) != Some(ColumnKind::Numeric) {
        return Ok(StageReport::skipped(
            StageKind::Integrity,
            SkipReason::MissingRequiredColumn {
                columns: vec![column.to_string()],
            },
        ));
    }

    let values = dataset.numeric_values(column)?;
    let neg_count = values.iter().flatten().filter(|v| **v < 0.0).count();

    if neg_count > 0 {
        let repaired: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| v.filter(|x| *x >= 0.0))
            .collect();
        dataset.replace_numeric(column, repaired)?;
    }
    tracing::debug!(column, neg_count, "negative values blanked");

    Ok(StageReport::applied(
        StageKind::Integrity,
        format!(
            "Fixed {} negative {} values (set to missing).",
            neg_count, column
        ),
    )
    .with_values_changed(neg_count))
}
