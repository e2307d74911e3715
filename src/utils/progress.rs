//! Progress spinners using indicatif

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::StageReport;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("    {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Finish a spinner with a success message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

/// Finish a spinner with a warning message
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠️  {}", message));
}

/// Finish a stage spinner: a warning when the stage was skipped, success otherwise
pub fn finish_stage(pb: &ProgressBar, report: &StageReport) {
    if report.is_skipped() {
        finish_with_warning(pb, &report.message);
    } else {
        finish_with_success(pb, &report.message);
    }
}
