//! Exact duplicate row removal

use polars::prelude::*;

use super::dataset::Dataset;
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Remove rows that exactly repeat an earlier row across all columns.
///
/// Missing cells compare equal to each other. The first occurrence of each
/// row is kept and the relative order of the survivors is unchanged.
pub fn remove_duplicates(dataset: &mut Dataset) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::Deduplicate,
            SkipReason::EmptyDataset,
        ));
    }

    let initial_count = dataset.height();
    let deduplicated = dataset
        .frame()
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    dataset.replace_frame(deduplicated);

    let dropped_count = initial_count - dataset.height();
    tracing::debug!(initial_count, dropped_count, "duplicates removed");

    Ok(StageReport::applied(
        StageKind::Deduplicate,
        format!("Removed {} duplicate rows.", dropped_count),
    )
    .with_rows_removed(dropped_count))
}
