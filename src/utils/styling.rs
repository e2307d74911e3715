//! Terminal styling utilities for the CLI

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::{DatasetSummary, PipelineConfig, StageKind};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("⚙").cyan().bold(),
        style("AutoPrep Pipeline").cyan().bold()
    );
    println!(
        "    {}",
        style("Automated data cleaning & preprocessing").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, output: &Path, config: &PipelineConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style(format!("{}Configuration", GEAR)).cyan().bold(),
        " ".repeat(box_width - 18)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(input, 38)
    );
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_path(output, 38)
    );
    println!("    ├{}┤", line);
    for stage in StageKind::ALL {
        let state = if config.is_enabled(stage) {
            style(stage_setting(stage, config)).green()
        } else {
            style("off".to_string()).dim()
        };
        println!("    │  {:<24} {:<29}│", stage.title(), state);
    }
    println!("    └{}┘", line);
    println!();
}

/// Short description of a stage's options, e.g. `on (fill)`
fn stage_setting(stage: StageKind, config: &PipelineConfig) -> String {
    match stage {
        StageKind::Integrity => format!("on ({} >= 0)", config.columns.age),
        StageKind::Consistency => format!(
            "on ({} = {} + {})",
            config.columns.total, config.columns.addends[0], config.columns.addends[1]
        ),
        StageKind::Impute => format!("on ({})", config.impute.strategy),
        StageKind::Outliers => format!("on (|z| < {})", config.remove_outliers.threshold),
        StageKind::Scale => format!("on ({})", config.scale.method),
        StageKind::Encode if config.encode.drop_first => "on (drop first)".to_string(),
        StageKind::Encode => "on (keep all)".to_string(),
        StageKind::Deduplicate | StageKind::TextNormalize => "on".to_string(),
    }
}

/// Print row/column/missing counts of a dataset
pub fn print_dataset_stats(label: &str, summary: &DatasetSummary) {
    println!("\n    {} {}:", style("✧").cyan(), label);
    println!("      Rows: {}", summary.rows);
    println!("      Columns: {}", summary.columns);
    println!("      Missing values: {}", summary.missing_values);
}

/// Print a step header with styling
pub fn print_step_header(step_num: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "      {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("AutoPrep cleaning complete!").green().bold()
    );
    println!();
}

/// Print a titled preview table
pub fn print_preview(title: &str, table: &str) {
    println!();
    println!("    {} {}", CHART, style(title).white().bold());
    for line in table.lines() {
        println!("    {}", line);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
