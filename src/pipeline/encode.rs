//! One-hot encoding of categorical columns
//!
//! Each encoded column is replaced, at its own position, by one boolean
//! indicator per distinct value, named `<column>_<value>`. Categories are
//! ordered lexicographically. Missing values still present at this point are
//! treated as a category of their own, labelled [`MISSING_CATEGORY`] and
//! ordered last.

use std::collections::{BTreeSet, HashSet};

use polars::prelude::*;

use super::dataset::{ColumnKind, Dataset};
use super::error::Result;
use super::report::{SkipReason, StageKind, StageReport};

/// Category label given to missing values
pub const MISSING_CATEGORY: &str = "missing";

/// Distinct categories of one column, in indicator order
pub fn categories(values: &[Option<String>]) -> Vec<Option<String>> {
    let present: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
    let mut categories: Vec<Option<String>> =
        present.into_iter().map(|v| Some(v.to_string())).collect();
    if values.iter().any(Option::is_none) {
        categories.push(None);
    }
    categories
}

/// One-hot expand categorical columns.
///
/// `subset` restricts encoding to the named columns; names that are absent
/// or not categorical are ignored. With `drop_first` the first indicator of
/// each source column is omitted.
pub fn one_hot_encode(
    dataset: &mut Dataset,
    drop_first: bool,
    subset: Option<&[String]>,
) -> Result<StageReport> {
    if dataset.is_empty() {
        return Ok(StageReport::skipped(StageKind::Encode, SkipReason::EmptyDataset));
    }

    let cat_cols = dataset.columns_of_kind(ColumnKind::Categorical);
    let targets: HashSet<String> = match subset {
        Some(names) => names
            .iter()
            .filter(|name| cat_cols.contains(name))
            .cloned()
            .collect(),
        None => cat_cols.into_iter().collect(),
    };

    if targets.is_empty() {
        let reason = match subset {
            Some(names) if !names.is_empty() => SkipReason::MissingRequiredColumn {
                columns: names.to_vec(),
            },
            _ => SkipReason::NoEligibleColumns,
        };
        return Ok(StageReport::skipped(StageKind::Encode, reason));
    }

    let mut taken: HashSet<String> = dataset
        .column_names()
        .into_iter()
        .filter(|name| !targets.contains(name))
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(dataset.width());
    let mut added = 0;

    for column in dataset.frame().get_columns() {
        let name = column.name().to_string();
        if !targets.contains(&name) {
            columns.push(column.clone());
            continue;
        }

        let values = dataset.text_values(&name)?;
        let categories = categories(&values);
        let skip = usize::from(drop_first);

        for category in categories.iter().skip(skip) {
            let label = category.as_deref().unwrap_or(MISSING_CATEGORY);
            let indicator_name = unique_name(format!("{}_{}", name, label), &mut taken);
            let indicator: Vec<bool> = values.iter().map(|v| v == category).collect();
            columns.push(Column::new(indicator_name.into(), indicator));
            added += 1;
        }
        tracing::debug!(column = %name, categories = categories.len(), drop_first, "column one-hot encoded");
    }

    let removed = targets.len();
    dataset.replace_frame(DataFrame::new(columns)?);

    Ok(StageReport::applied(
        StageKind::Encode,
        format!(
            "Encoded {} categorical column(s) into {} indicator column(s).",
            removed, added
        ),
    )
    .with_columns(added, removed))
}

/// Append a numeric suffix until `candidate` does not clash with a taken name
fn unique_name(candidate: String, taken: &mut HashSet<String>) -> String {
    let mut name = candidate.clone();
    let mut suffix = 1;
    while taken.contains(&name) {
        name = format!("{}_{}", candidate, suffix);
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}
