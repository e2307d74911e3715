//! Cleaning summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{DatasetSummary, StageReport};

/// Summary of a cleaning run, rendered at the end of the CLI output
#[derive(Debug, Default)]
pub struct CleaningSummary {
    pub before: DatasetSummary,
    pub after: DatasetSummary,
    pub stages: Vec<(StageReport, Duration)>,
    pub load_time: Duration,
    pub save_time: Duration,
}

impl CleaningSummary {
    pub fn new(before: DatasetSummary) -> Self {
        Self {
            before,
            after: before,
            ..Default::default()
        }
    }

    pub fn add_stage(&mut self, report: StageReport, elapsed: Duration) {
        self.stages.push((report, elapsed));
    }

    pub fn set_after(&mut self, after: DatasetSummary) {
        self.after = after;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.save_time + self.stages.iter().map(|(_, t)| *t).sum::<Duration>()
    }

    pub fn rows_removed(&self) -> usize {
        self.stages.iter().map(|(r, _)| r.rows_removed).sum()
    }

    pub fn values_changed(&self) -> usize {
        self.stages.iter().map(|(r, _)| r.values_changed).sum()
    }

    /// Table of per-stage effects
    pub fn stage_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Stage").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Rows Removed").add_attribute(Attribute::Bold),
            Cell::new("Values Changed").add_attribute(Attribute::Bold),
            Cell::new("Columns +/-").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);

        for (report, elapsed) in &self.stages {
            let status = if report.is_skipped() {
                Cell::new("skipped").fg(Color::Yellow)
            } else {
                Cell::new("applied").fg(Color::Green)
            };
            table.add_row(vec![
                Cell::new(report.stage.title()),
                status,
                count_cell(report.rows_removed),
                count_cell(report.values_changed),
                Cell::new(format!("+{} / -{}", report.columns_added, report.columns_removed)),
                Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
            ]);
        }

        table
    }

    /// Table comparing dataset shape before and after cleaning
    pub fn shape_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Before").add_attribute(Attribute::Bold),
            Cell::new("After").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📏 Rows"),
            Cell::new(self.before.rows),
            Cell::new(self.after.rows).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("📐 Columns"),
            Cell::new(self.before.columns),
            Cell::new(self.after.columns).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("❓ Missing Values"),
            Cell::new(self.before.missing_values),
            Cell::new(self.after.missing_values)
                .fg(if self.after.missing_values == 0 {
                    Color::Green
                } else {
                    Color::Yellow
                })
                .add_attribute(Attribute::Bold),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the tables
        for line in self.shape_table().to_string().lines() {
            println!("    {}", line);
        }

        if self.stages.is_empty() {
            println!();
            println!("      {}", style("No stages were enabled.").dim());
            return;
        }

        println!();
        for line in self.stage_table().to_string().lines() {
            println!("    {}", line);
        }

        let skipped: Vec<&StageReport> = self
            .stages
            .iter()
            .map(|(r, _)| r)
            .filter(|r| r.is_skipped())
            .collect();
        if !skipped.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Skipped Stages").yellow(),
                style(format!("({})", skipped.len())).dim()
            );
            for report in skipped {
                println!(
                    "        {} {}: {}",
                    style("•").dim(),
                    report.stage.title(),
                    report.message
                );
            }
        }

        let degenerate: Vec<(&StageReport, &String)> = self
            .stages
            .iter()
            .flat_map(|(r, _)| r.degenerate_columns.iter().map(move |c| (r, c)))
            .collect();
        if !degenerate.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Constant Columns").yellow(),
                style("(zero fallback used)").dim()
            );
            for (report, column) in degenerate {
                println!(
                    "        {} {} ({})",
                    style("•").dim(),
                    column,
                    report.stage.title()
                );
            }
        }

        println!();
        println!(
            "      {}",
            style(format!("Total time: {:.2}s", self.total_time().as_secs_f64())).dim()
        );
    }
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
}
