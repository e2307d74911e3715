//! Shared test utilities and fixture generators
#![allow(dead_code)]

use autoprep::pipeline::Dataset;
use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Wrap a DataFrame fixture into a Dataset
pub fn dataset(df: DataFrame) -> Dataset {
    Dataset::new(df).unwrap()
}

/// Create a small employee table touching every cleaning stage
///
/// This DataFrame includes:
/// - `Age`: one missing, one negative
/// - `City`: mixed casing and stray whitespace
/// - `Part1`/`Part2`/`Total`: one wrong total (row 1)
pub fn create_employee_dataframe() -> DataFrame {
    df! {
        "Age" => [Some(25.0f64), Some(-5.0), None, Some(40.0)],
        "City" => ["paris ", "PARIS", "Berlin", " berlin"],
        "Part1" => [10.0f64, 10.0, 1.0, 2.0],
        "Part2" => [15.0f64, 15.0, 1.0, 3.0],
        "Total" => [25.0f64, 30.0, 2.0, 5.0],
    }
    .unwrap()
}

/// Column of 20 inliers in the 9..=13 range followed by a single 500
pub fn outlier_values() -> Vec<f64> {
    let mut values: Vec<f64> = [10.0, 12.0, 11.0, 13.0, 9.0]
        .iter()
        .copied()
        .cycle()
        .take(20)
        .collect();
    values.push(500.0);
    values
}

/// Write raw CSV text into a temp directory
pub fn create_temp_csv_text(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Assert two floats agree to within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
