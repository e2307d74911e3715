//! Cross-column consistency repair

use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Recompute `total = addend1 + addend2` wherever the stored total disagrees.
///
/// The addends are trusted as ground truth. Rows where either addend is
/// missing have no computable sum and are left untouched; a missing total
/// with both addends present is filled and counted as a correction.
pub fn fix_totals(
    dataset: &mut Dataset,
    total: &str,
    addends: [&str; 2],
) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::Consistency,
            SkipReason::EmptyDataset,
        ));
    }

    let absent: Vec<String> = [total, addends[0], addends[1]]
        .into_iter()
        .filter(|name| dataset.kind_of(name) != Some(ColumnKind::Numeric))
        .map(str::to_string)
        .collect();
    if !absent.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::Consistency,
            SkipReason::MissingRequiredColumn { columns: absent },
        ));
    }

    let totals = dataset.numeric_values(total)?;
    let first = dataset.numeric_values(addends[0])?;
    let second = dataset.numeric_values(addends[1])?;

    let mut mismatches = 0;
    let corrected: Vec<Option<f64>> = totals
        .iter()
        .zip(first.iter().zip(&second))
        .map(|(stored, (a, b))| match (a, b) {
            (Some(a), Some(b)) => {
                let expected = a + b;
                if *stored != Some(expected) {
                    mismatches += 1;
                }
                Some(expected)
            }
            _ => *stored,
        })
        .collect();

    if mismatches > 0 {
        dataset.replace_numeric(total, corrected)?;
    }
    tracing::debug!(total, mismatches, "totals recomputed");

    Ok(StageReport::applied(
        StageKind::Consistency,
        format!(
            "Corrected {} calculation errors in '{}' column.",
            mismatches, total
        ),
    )
    .with_values_changed(mismatches))
}
