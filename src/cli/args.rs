//! Command-line argument definitions using clap

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{ImputeStrategy, PipelineConfig, ScaleMethod, StageKind};

/// AutoPrep - Clean tabular data with an ordered preprocessing pipeline
#[derive(Parser, Debug)]
#[command(name = "autoprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input CSV file path
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV file path.
    /// Defaults to input directory with '_cleaned' suffix (e.g., data.csv → data_cleaned.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pipeline configuration file (JSON). Flags below are applied on top of it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip duplicate row removal
    #[arg(long, default_value = "false")]
    pub skip_duplicates: bool,

    /// Skip the negative-age integrity repair
    #[arg(long, default_value = "false")]
    pub skip_integrity: bool,

    /// Skip trimming and title-casing of text columns
    #[arg(long, default_value = "false")]
    pub skip_text: bool,

    /// Skip the Total = Part1 + Part2 consistency repair
    #[arg(long, default_value = "false")]
    pub skip_consistency: bool,

    /// Skip missing value handling
    #[arg(long, default_value = "false")]
    pub skip_impute: bool,

    /// Skip z-score outlier removal
    #[arg(long, default_value = "false")]
    pub skip_outliers: bool,

    /// Skip numeric feature scaling
    #[arg(long, default_value = "false")]
    pub skip_scaling: bool,

    /// Skip one-hot encoding of categorical columns
    #[arg(long, default_value = "false")]
    pub skip_encoding: bool,

    /// Missing value strategy.
    /// Options: "fill" (mean for numeric, mode for text) or "drop" (remove incomplete rows)
    #[arg(long)]
    pub impute_strategy: Option<ImputeStrategy>,

    /// Z-score threshold - drop rows with |z| at or above this value in any numeric column
    #[arg(long, value_parser = validate_outlier_threshold)]
    pub outlier_threshold: Option<f64>,

    /// Scaling method.
    /// Options: "standard" (zero mean, unit variance) or "minmax" (range 0 to 1)
    #[arg(long)]
    pub scale_method: Option<ScaleMethod>,

    /// Omit the first indicator column of every one-hot encoded column
    #[arg(long, default_value = "false")]
    pub drop_first: bool,

    /// Only one-hot encode these columns (comma-separated).
    /// Default: every categorical column.
    #[arg(long, value_delimiter = ',')]
    pub encode_columns: Vec<String>,

    /// Column whose negative values are treated as invalid
    #[arg(long)]
    pub age_column: Option<String>,

    /// Column expected to equal the sum of the two addend columns
    #[arg(long)]
    pub total_column: Option<String>,

    /// The two addend columns of the total (comma-separated, e.g. Part1,Part2)
    #[arg(long, value_delimiter = ',')]
    pub addend_columns: Vec<String>,

    /// Write a JSON run report (summaries and per-stage diagnostics) to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the first N rows of the raw and cleaned data (0 disables)
    #[arg(long, default_value = "0")]
    pub preview: usize,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for column type inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity (-v for info, -vv for debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a small messy demo dataset for trying out the pipeline
    Generate {
        /// Output file path (defaults to raw_data.csv in the current directory)
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_cleaned' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_cleaned.csv", stem))
        }))
    }

    /// Build the effective pipeline configuration: the config file (or the
    /// defaults) with every command-line override applied.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load pipeline config: {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        let skips = [
            (StageKind::Deduplicate, self.skip_duplicates),
            (StageKind::Integrity, self.skip_integrity),
            (StageKind::TextNormalize, self.skip_text),
            (StageKind::Consistency, self.skip_consistency),
            (StageKind::Impute, self.skip_impute),
            (StageKind::Outliers, self.skip_outliers),
            (StageKind::Scale, self.skip_scaling),
            (StageKind::Encode, self.skip_encoding),
        ];
        for (stage, skip) in skips {
            if skip {
                config.set_enabled(stage, false);
            }
        }

        if let Some(strategy) = self.impute_strategy {
            config.impute.strategy = strategy;
        }
        if let Some(threshold) = self.outlier_threshold {
            config.remove_outliers.threshold = threshold;
        }
        if let Some(method) = self.scale_method {
            config.scale.method = method;
        }
        if self.drop_first {
            config.encode.drop_first = true;
        }
        if !self.encode_columns.is_empty() {
            config.encode.columns = Some(self.encode_columns.clone());
        }
        if let Some(age) = &self.age_column {
            config.columns.age = age.clone();
        }
        if let Some(total) = &self.total_column {
            config.columns.total = total.clone();
        }
        match self.addend_columns.as_slice() {
            [] => {}
            [first, second] => {
                config.columns.addends = [first.clone(), second.clone()];
            }
            other => anyhow::bail!(
                "--addend-columns expects exactly two column names, got {}",
                other.len()
            ),
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

/// Validator for outlier_threshold parameter
fn validate_outlier_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value <= 0.0 {
        Err(format!(
            "outlier_threshold must be a positive number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
