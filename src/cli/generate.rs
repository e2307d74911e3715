//! Demo dataset generator
//!
//! Produces a fixed, deliberately dirty table that exercises every cleaning
//! stage: a duplicate row, missing cells, a negative age, salary and age
//! outliers, inconsistent casing and whitespace, and wrong totals.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::pipeline::{save_dataset, Dataset};
use crate::utils::create_spinner;

/// Default file name used when no output path is given
pub const DEFAULT_DEMO_FILE: &str = "raw_data.csv";

/// Build the messy demo table. Deterministic: no randomness involved.
pub fn messy_dataframe() -> PolarsResult<DataFrame> {
    df! {
        "EmployeeID" => [101i64, 102, 103, 104, 105, 106, 107, 108, 109, 108],
        "Age" => [Some(25.0f64), Some(30.0), None, Some(35.0), Some(100.0), Some(28.0), Some(45.0), None, Some(-5.0), None],
        "Salary" => [Some(50000.0f64), Some(60000.0), Some(55000.0), None, Some(200000.0), Some(58000.0), Some(62000.0), Some(59000.0), Some(61000.0), Some(59000.0)],
        "City" => ["New York", "paris ", "New York", "PARIS", "Berlin", " berlin", "Tokyo", "tokyo", "Paris", "tokyo"],
        "Department" => [Some("IT"), Some("HR"), Some("it"), Some("Finance"), Some("IT"), Some("hr "), Some("Finance"), Some("IT"), None, Some("IT")],
        "Part1" => [10.0f64, 20.0, 7.0, 10.0, 1.0, 4.0, 6.0, 3.0, 8.0, 3.0],
        "Part2" => [15.0f64, 5.0, 3.0, 15.0, 1.0, 4.0, 6.0, 2.0, 8.0, 2.0],
        "Total" => [25.0f64, 25.0, 11.0, 30.0, 2.0, 8.0, 12.0, 5.0, 16.0, 5.0],
    }
}

/// Write the demo dataset to `output` (or [`DEFAULT_DEMO_FILE`])
pub fn run_generate(output: Option<&Path>) -> Result<()> {
    let output_path = output.unwrap_or_else(|| Path::new(DEFAULT_DEMO_FILE));

    println!(
        "\n {} Generating demo dataset",
        style("◆").cyan().bold()
    );
    println!("   Output: {}", style(output_path.display()).dim());
    println!();

    let spinner = create_spinner("Writing messy dataset...");
    let dataset = Dataset::new(messy_dataframe()?)?;
    save_dataset(&dataset, output_path)
        .with_context(|| format!("Failed to write demo dataset: {}", output_path.display()))?;
    spinner.finish_with_message(format!("{} Demo dataset written", style("✓").green()));

    println!();
    println!(
        "   {} rows × {} columns",
        style(dataset.height()).yellow(),
        style(dataset.width()).yellow()
    );
    println!("{}", dataset.frame());
    println!();
    println!(
        " {} Run: autoprep -i {}",
        style("→").cyan().bold(),
        output_path.display()
    );

    Ok(())
}
