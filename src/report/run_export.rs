//! JSON export of a pipeline run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnKind, DatasetSummary, PipelineConfig, PipelineOutcome, StageReport};

/// Metadata about the cleaning run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// AutoPrep version
    pub autoprep_version: String,
    pub input_file: String,
    pub output_file: String,
    /// Effective configuration after CLI overrides
    pub config: PipelineConfig,
}

/// One column of the cleaned dataset
#[derive(Serialize)]
pub struct ColumnEntry {
    pub name: String,
    pub kind: ColumnKind,
}

/// Complete run export
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub metadata: RunMetadata,
    pub before: DatasetSummary,
    pub after: DatasetSummary,
    /// Per-stage diagnostics, in execution order
    pub stages: &'a [StageReport],
    /// Final schema
    pub columns: Vec<ColumnEntry>,
}

/// Parameters for run report export
pub struct RunExportParams<'a> {
    pub input_file: &'a Path,
    pub output_file: &'a Path,
    pub config: &'a PipelineConfig,
}

/// Build the serializable report for a finished run
pub fn build_run_report<'a>(outcome: &'a PipelineOutcome, params: &RunExportParams<'_>) -> RunReport<'a> {
    let columns = outcome
        .dataset
        .schema()
        .into_iter()
        .map(|(name, kind)| ColumnEntry { name, kind })
        .collect();

    RunReport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            autoprep_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.display().to_string(),
            output_file: params.output_file.display().to_string(),
            config: params.config.clone(),
        },
        before: outcome.before,
        after: outcome.after,
        stages: &outcome.reports,
        columns,
    }
}

/// Export a run report to a JSON file
///
/// # Arguments
/// * `outcome` - The finished pipeline run
/// * `output_path` - Path to write the JSON file
/// * `params` - Export parameters for metadata
pub fn export_run_report(
    outcome: &PipelineOutcome,
    output_path: &Path,
    params: &RunExportParams<'_>,
) -> Result<()> {
    let report = build_run_report(outcome, params);

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}
