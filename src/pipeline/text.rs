//! Text standardization for categorical columns

use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Trim and title-case every value of every categorical column.
///
/// `"paris "`, `"PARIS"` and `"Paris"` all become `"Paris"`, so later mode
/// and one-hot computations see one category. Missing values pass through.
pub fn standardize_text(dataset: &mut Dataset) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::TextNormalize,
            SkipReason::EmptyDataset,
        ));
    }

    let cat_cols = dataset.columns_of_kind(ColumnKind::Categorical);
    if cat_cols.is_empty() {
        return Ok(StageReport::skipped(
            StageKind::TextNormalize,
            SkipReason::NoEligibleColumns,
        ));
    }

    let mut changed = 0;
    for col in &cat_cols {
        let values = dataset.text_values(col)?;
        let standardized: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_deref().map(standardize_value))
            .collect();

        let col_changed = values
            .iter()
            .zip(&standardized)
            .filter(|(before, after)| before != after)
            .count();

        if col_changed > 0 {
            dataset.replace_text(col, standardized)?;
        }
        tracing::debug!(column = %col, changed = col_changed, "text standardized");
        changed += col_changed;
    }

    Ok(StageReport::applied(
        StageKind::TextNormalize,
        format!(
            "Text columns standardized (Trimmed & Title Cased): {} value(s) changed in {} column(s).",
            changed,
            cat_cols.len()
        ),
    )
    .with_values_changed(changed))
}

/// Trim surrounding whitespace and title-case each whitespace-delimited token
pub fn standardize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_token_start = true;

    for ch in value.trim().chars() {
        if ch.is_whitespace() {
            out.push(ch);
            at_token_start = true;
        } else if at_token_start {
            // Only the first char of a multi-char uppercase form stays upper: ß -> Ss
            let mut upper = ch.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            at_token_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}
