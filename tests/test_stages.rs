//! Tests for the individual cleaning stages

use autoprep::pipeline::{
    fix_negative_values, fix_totals, handle_missing_values, one_hot_encode, remove_duplicates,
    remove_outliers, scale_numeric, standardize_text, ColumnKind, Dataset, ImputeStrategy,
    ScaleMethod, SkipReason, StageOutcome,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn test_dedup_keeps_first_occurrence() {
    let mut ds = dataset(
        df! {
            "key" => ["A", "B", "A"],
            "n" => [1.0f64, 2.0, 1.0],
        }
        .unwrap(),
    );

    let report = remove_duplicates(&mut ds).unwrap();

    assert_eq!(report.rows_removed, 1);
    assert_eq!(
        ds.text_values("key").unwrap(),
        vec![Some("A".to_string()), Some("B".to_string())]
    );
}

#[test]
fn test_dedup_treats_missing_as_equal() {
    let mut ds = dataset(
        df! {
            "a" => [None, Some(1.0f64), None],
            "b" => [Some("x"), Some("y"), Some("x")],
        }
        .unwrap(),
    );

    let report = remove_duplicates(&mut ds).unwrap();

    assert_eq!(report.rows_removed, 1);
    assert_eq!(ds.height(), 2);
}

#[test]
fn test_dedup_no_duplicates_is_noop() {
    let mut ds = dataset(create_employee_dataframe());

    let report = remove_duplicates(&mut ds).unwrap();

    assert_eq!(report.rows_removed, 0);
    assert!(report.is_noop());
    assert_eq!(ds.height(), 4);
}

// ============================================================================
// Integrity
// ============================================================================

#[test]
fn test_negative_age_becomes_missing() {
    let mut ds = dataset(create_employee_dataframe());

    let report = fix_negative_values(&mut ds, "Age").unwrap();

    assert_eq!(report.values_changed, 1);
    assert_eq!(
        ds.numeric_values("Age").unwrap(),
        vec![Some(25.0), None, None, Some(40.0)]
    );
    assert_eq!(ds.height(), 4);
}

#[test]
fn test_zero_age_is_kept() {
    let mut ds = dataset(df! { "Age" => [0.0f64, 1.0] }.unwrap());

    let report = fix_negative_values(&mut ds, "Age").unwrap();

    assert_eq!(report.values_changed, 0);
    assert_eq!(ds.numeric_values("Age").unwrap(), vec![Some(0.0), Some(1.0)]);
}

#[test]
fn test_integrity_without_age_column_is_skipped() {
    let mut ds = dataset(df! { "Salary" => [-1.0f64, 2.0] }.unwrap());

    let report = fix_negative_values(&mut ds, "Age").unwrap();

    assert_eq!(
        report.outcome,
        StageOutcome::Skipped(SkipReason::MissingRequiredColumn {
            columns: vec!["Age".to_string()]
        })
    );
    assert_eq!(ds.numeric_values("Salary").unwrap(), vec![Some(-1.0), Some(2.0)]);
}

// ============================================================================
// Text standardization
// ============================================================================

#[test]
fn test_text_trimmed_and_title_cased() {
    let mut ds = dataset(create_employee_dataframe());

    let report = standardize_text(&mut ds).unwrap();

    assert_eq!(report.values_changed, 3);
    assert_eq!(
        ds.text_values("City").unwrap(),
        vec![
            Some("Paris".to_string()),
            Some("Paris".to_string()),
            Some("Berlin".to_string()),
            Some("Berlin".to_string()),
        ]
    );
}

#[test]
fn test_text_standardization_is_idempotent() {
    let mut ds = dataset(
        df! {
            "City" => [Some("  new YORK "), Some("sAN   francisco"), None, Some("o'neil"), Some("ßa STRASSE")],
        }
        .unwrap(),
    );

    standardize_text(&mut ds).unwrap();
    let once = ds.text_values("City").unwrap();
    let report = standardize_text(&mut ds).unwrap();

    assert_eq!(ds.text_values("City").unwrap(), once);
    assert_eq!(report.values_changed, 0);
    assert_eq!(once[2], None, "missing values pass through");
}

#[test]
fn test_text_without_categorical_columns_is_skipped() {
    let mut ds = dataset(df! { "n" => [1.0f64] }.unwrap());

    let report = standardize_text(&mut ds).unwrap();

    assert_eq!(report.outcome, StageOutcome::Skipped(SkipReason::NoEligibleColumns));
}

// ============================================================================
// Consistency
// ============================================================================

#[test]
fn test_wrong_total_is_recomputed() {
    let mut ds = dataset(create_employee_dataframe());

    let report = fix_totals(&mut ds, "Total", ["Part1", "Part2"]).unwrap();

    assert_eq!(report.values_changed, 1);
    assert_eq!(
        ds.numeric_values("Total").unwrap(),
        vec![Some(25.0), Some(25.0), Some(2.0), Some(5.0)]
    );
}

#[test]
fn test_consistency_leaves_rows_with_missing_addend() {
    let mut ds = dataset(
        df! {
            "Part1" => [Some(1.0f64), None, Some(4.0)],
            "Part2" => [Some(2.0f64), Some(3.0), Some(5.0)],
            "Total" => [Some(3.0f64), Some(99.0), None],
        }
        .unwrap(),
    );

    let report = fix_totals(&mut ds, "Total", ["Part1", "Part2"]).unwrap();

    assert_eq!(report.values_changed, 1);
    assert_eq!(
        ds.numeric_values("Total").unwrap(),
        vec![Some(3.0), Some(99.0), Some(9.0)]
    );
}

#[test]
fn test_consistency_lists_absent_columns() {
    let mut ds = dataset(df! { "Part1" => [1.0f64], "Total" => [1.0f64] }.unwrap());

    let report = fix_totals(&mut ds, "Total", ["Part1", "Part2"]).unwrap();

    assert_eq!(
        report.outcome,
        StageOutcome::Skipped(SkipReason::MissingRequiredColumn {
            columns: vec!["Part2".to_string()]
        })
    );
    assert_eq!(report.values_changed, 0);
}

// ============================================================================
// Imputation
// ============================================================================

#[test]
fn test_fill_uses_mean_and_mode() {
    let mut ds = dataset(
        df! {
            "n" => [Some(10.0f64), None, Some(30.0)],
            "c" => [Some("It"), Some("It"), None],
        }
        .unwrap(),
    );

    let report = handle_missing_values(&mut ds, ImputeStrategy::Fill).unwrap();

    assert_eq!(report.values_changed, 2);
    assert_eq!(ds.height(), 3);
    assert_eq!(
        ds.numeric_values("n").unwrap(),
        vec![Some(10.0), Some(20.0), Some(30.0)]
    );
    assert_eq!(
        ds.text_values("c").unwrap(),
        vec![Some("It".to_string()), Some("It".to_string()), Some("It".to_string())]
    );
    assert_eq!(ds.missing_count(), 0);
}

#[test]
fn test_fill_leaves_fully_missing_column() {
    let mut ds = dataset(
        df! {
            "n" => [None::<f64>, None],
            "m" => [Some(1.0f64), None],
        }
        .unwrap(),
    );

    let report = handle_missing_values(&mut ds, ImputeStrategy::Fill).unwrap();

    assert_eq!(report.values_changed, 1);
    assert_eq!(ds.numeric_values("n").unwrap(), vec![None, None]);
    assert_eq!(ds.numeric_values("m").unwrap(), vec![Some(1.0), Some(1.0)]);
}

#[test]
fn test_fill_leaves_fully_missing_text_column() {
    let mut ds = dataset(
        df! {
            "c" => [None::<&str>, None],
            "d" => [Some("Hr"), None],
        }
        .unwrap(),
    );

    let report = handle_missing_values(&mut ds, ImputeStrategy::Fill).unwrap();

    assert_eq!(ds.kind_of("c"), Some(ColumnKind::Categorical));
    assert_eq!(report.values_changed, 1);
    assert_eq!(ds.text_values("c").unwrap(), vec![None, None]);
    assert_eq!(
        ds.text_values("d").unwrap(),
        vec![Some("Hr".to_string()), Some("Hr".to_string())]
    );
}

#[test]
fn test_drop_keeps_only_complete_rows() {
    let mut ds = dataset(
        df! {
            "n" => [Some(1.0f64), None, Some(3.0), Some(4.0)],
            "c" => [Some("a"), Some("b"), None, Some("d")],
        }
        .unwrap(),
    );

    let report = handle_missing_values(&mut ds, ImputeStrategy::Drop).unwrap();

    assert_eq!(report.rows_removed, 2);
    assert_eq!(ds.numeric_values("n").unwrap(), vec![Some(1.0), Some(4.0)]);
    assert_eq!(ds.missing_count(), 0);
}

// ============================================================================
// Outliers
// ============================================================================

#[test]
fn test_extreme_value_row_is_dropped() {
    let values = outlier_values();
    let n = values.len();
    let ids: Vec<String> = (0..n).map(|i| format!("row{}", i)).collect();
    let mut ds = dataset(
        df! {
            "id" => ids,
            "v" => values,
        }
        .unwrap(),
    );

    let report = remove_outliers(&mut ds, 3.0).unwrap();

    assert_eq!(report.rows_removed, 1);
    assert_eq!(ds.height(), n - 1);
    assert!(ds
        .numeric_values("v")
        .unwrap()
        .iter()
        .flatten()
        .all(|v| *v < 100.0));
}

#[test]
fn test_outlier_statistics_ignore_incomplete_rows() {
    // 21 complete rows: 20 inliers and a 500, plus two rows missing `w`
    let mut ids: Vec<String> = (0..20).map(|i| format!("row{}", i)).collect();
    ids.push("big".to_string());
    ids.push("gap_extreme".to_string());
    ids.push("gap_inlier".to_string());

    let mut v: Vec<Option<f64>> = outlier_values().into_iter().map(Some).collect();
    v.push(Some(100_000.0));
    v.push(Some(11.0));

    let mut w: Vec<Option<f64>> = (0..21)
        .map(|i| Some(if i % 2 == 0 { 1.0 } else { 2.0 }))
        .collect();
    w.push(None);
    w.push(None);

    let mut ds = dataset(
        df! {
            "id" => ids,
            "v" => v,
            "w" => w,
        }
        .unwrap(),
    );

    let report = remove_outliers(&mut ds, 3.0).unwrap();

    // Had the 100000 fed the mean and stddev, the 500 would score below 3
    assert_eq!(report.rows_removed, 2);
    assert_eq!(ds.height(), 21);
    let kept: Vec<String> = ds.text_values("id").unwrap().into_iter().flatten().collect();
    assert!(!kept.contains(&"big".to_string()));
    assert!(!kept.contains(&"gap_extreme".to_string()));
    assert!(kept.contains(&"gap_inlier".to_string()));
}

#[test]
fn test_six_values_alone_stay_below_threshold() {
    // Population stddev caps |z| at sqrt(5) for six values
    let mut ds = dataset(df! { "v" => [10.0f64, 12.0, 11.0, 13.0, 9.0, 500.0] }.unwrap());

    let report = remove_outliers(&mut ds, 3.0).unwrap();

    assert_eq!(report.rows_removed, 0);

    let report = remove_outliers(&mut ds, 2.0).unwrap();
    assert_eq!(report.rows_removed, 1);
}

#[test]
fn test_constant_column_never_drops_rows() {
    let mut ds = dataset(df! { "v" => [5.0f64; 8] }.unwrap());

    let report = remove_outliers(&mut ds, 0.5).unwrap();

    assert_eq!(report.rows_removed, 0);
    assert_eq!(report.degenerate_columns, vec!["v".to_string()]);
}

#[test]
fn test_outliers_without_complete_rows_is_skipped() {
    let mut ds = dataset(
        df! {
            "a" => [Some(1.0f64), None],
            "b" => [None, Some(2.0f64)],
        }
        .unwrap(),
    );

    let report = remove_outliers(&mut ds, 3.0).unwrap();

    assert_eq!(report.outcome, StageOutcome::Skipped(SkipReason::NoCompleteRows));
    assert_eq!(ds.height(), 2);
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_minmax_range() {
    let mut ds = dataset(
        df! {
            "v" => [Some(3.0f64), Some(7.0), None, Some(5.0)],
            "flat" => [2.0f64, 2.0, 2.0, 2.0],
            "c" => ["a", "b", "c", "d"],
        }
        .unwrap(),
    );

    let report = scale_numeric(&mut ds, ScaleMethod::MinMax).unwrap();

    assert_eq!(
        ds.numeric_values("v").unwrap(),
        vec![Some(0.0), Some(1.0), None, Some(0.5)]
    );
    assert_eq!(ds.numeric_values("flat").unwrap(), vec![Some(0.0); 4]);
    assert_eq!(report.degenerate_columns, vec!["flat".to_string()]);
    assert_eq!(ds.text_values("c").unwrap()[0], Some("a".to_string()));
}

#[test]
fn test_standard_scaling_zero_mean_unit_variance() {
    let mut ds = dataset(df! { "v" => [2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] }.unwrap());

    scale_numeric(&mut ds, ScaleMethod::Standard).unwrap();

    let scaled: Vec<f64> = ds.numeric_values("v").unwrap().into_iter().flatten().collect();
    let n = scaled.len() as f64;
    let mean = scaled.iter().sum::<f64>() / n;
    let variance = scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    assert_close(mean, 0.0);
    assert_close(variance, 1.0);
    assert_close(scaled[0], -1.5);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_keep_all_encoding_one_true_per_row() {
    let mut ds = dataset(
        df! {
            "id" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "g" => ["D", "B", "A", "C", "A"],
        }
        .unwrap(),
    );

    let report = one_hot_encode(&mut ds, false, None).unwrap();

    assert_eq!(report.columns_added, 4);
    assert_eq!(report.columns_removed, 1);
    assert_eq!(ds.column_names(), vec!["id", "g_A", "g_B", "g_C", "g_D"]);
    assert_one_true_per_row(&ds, &["g_A", "g_B", "g_C", "g_D"]);
    assert_eq!(ds.kind_of("g_A"), Some(ColumnKind::Boolean));
}

#[test]
fn test_missing_value_gets_own_indicator() {
    let mut ds = dataset(
        df! {
            "g" => [Some("A"), None, Some("B")],
        }
        .unwrap(),
    );

    one_hot_encode(&mut ds, false, None).unwrap();

    assert_eq!(ds.column_names(), vec!["g_A", "g_B", "g_missing"]);
    assert_one_true_per_row(&ds, &["g_A", "g_B", "g_missing"]);
}

#[test]
fn test_drop_first_omits_first_category() {
    let mut ds = dataset(df! { "g" => ["B", "A", "C"] }.unwrap());

    let report = one_hot_encode(&mut ds, true, None).unwrap();

    assert_eq!(report.columns_added, 2);
    assert_eq!(ds.column_names(), vec!["g_B", "g_C"]);
}

#[test]
fn test_encode_subset_only_touches_named_columns() {
    let mut ds = dataset(
        df! {
            "City" => ["Paris", "Berlin"],
            "Dept" => ["It", "Hr"],
        }
        .unwrap(),
    );

    let subset = vec!["Dept".to_string()];
    one_hot_encode(&mut ds, false, Some(&subset)).unwrap();

    assert_eq!(ds.column_names(), vec!["City", "Dept_Hr", "Dept_It"]);
}

#[test]
fn test_encode_without_categorical_columns_is_skipped() {
    let mut ds = dataset(df! { "n" => [1.0f64, 2.0] }.unwrap());

    let report = one_hot_encode(&mut ds, false, None).unwrap();

    assert_eq!(report.outcome, StageOutcome::Skipped(SkipReason::NoEligibleColumns));
    assert_eq!(ds.width(), 1);
}

// ============================================================================
// Empty datasets
// ============================================================================

#[test]
fn test_every_stage_noops_on_empty_dataset() {
    let empty = || Dataset::new(DataFrame::empty()).unwrap();

    let reports = vec![
        remove_duplicates(&mut empty()).unwrap(),
        fix_negative_values(&mut empty(), "Age").unwrap(),
        standardize_text(&mut empty()).unwrap(),
        fix_totals(&mut empty(), "Total", ["Part1", "Part2"]).unwrap(),
        handle_missing_values(&mut empty(), ImputeStrategy::Fill).unwrap(),
        remove_outliers(&mut empty(), 3.0).unwrap(),
        scale_numeric(&mut empty(), ScaleMethod::Standard).unwrap(),
        one_hot_encode(&mut empty(), false, None).unwrap(),
    ];

    for report in reports {
        assert_eq!(
            report.outcome,
            StageOutcome::Skipped(SkipReason::EmptyDataset),
            "{} should skip",
            report.stage
        );
        assert!(report.is_noop());
    }
}

fn assert_one_true_per_row(ds: &Dataset, indicators: &[&str]) {
    let frame = ds.frame();
    for row in 0..ds.height() {
        let trues = indicators
            .iter()
            .filter(|name| {
                frame
                    .column(name)
                    .unwrap()
                    .bool()
                    .unwrap()
                    .get(row)
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(trues, 1, "row {} has {} true indicators", row, trues);
    }
}
