//! Pipeline configuration
//!
//! Every stage can be toggled on its own. Enabling a later stage without an
//! earlier one is always accepted; the runner still applies the enabled
//! stages in the fixed order of [`StageKind::ALL`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PrepError, Result};
use super::report::StageKind;

/// Default z-score cutoff for outlier removal
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// How missing values are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeStrategy {
    /// Remove every row holding a missing value
    Drop,
    /// Mean for numeric columns, mode for categorical columns
    #[default]
    Fill,
}

impl std::fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImputeStrategy::Drop => write!(f, "drop"),
            ImputeStrategy::Fill => write!(f, "fill"),
        }
    }
}

impl std::str::FromStr for ImputeStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(ImputeStrategy::Drop),
            "fill" => Ok(ImputeStrategy::Fill),
            _ => Err(format!(
                "Unknown imputation strategy: '{}'. Use 'drop' or 'fill'.",
                s
            )),
        }
    }
}

/// Numeric scaling formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMethod {
    /// `(x - mean) / stddev`
    #[default]
    Standard,
    /// `(x - min) / (max - min)`
    MinMax,
}

impl std::fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleMethod::Standard => write!(f, "standard"),
            ScaleMethod::MinMax => write!(f, "minmax"),
        }
    }
}

impl std::str::FromStr for ScaleMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "zscore" => Ok(ScaleMethod::Standard),
            "minmax" | "min-max" => Ok(ScaleMethod::MinMax),
            _ => Err(format!(
                "Unknown scaling method: '{}'. Use 'standard' or 'minmax'.",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputeConfig {
    pub enabled: bool,
    pub strategy: ImputeStrategy,
}

impl Default for ImputeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: ImputeStrategy::Fill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    pub enabled: bool,
    /// Rows with `|z| >= threshold` in any numeric column are dropped
    pub threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub enabled: bool,
    pub method: ScaleMethod,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            method: ScaleMethod::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub enabled: bool,
    /// Omit the first indicator of every encoded column
    pub drop_first: bool,
    /// Restrict encoding to these columns; `None` encodes every categorical column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drop_first: false,
            columns: None,
        }
    }
}

/// Names of the columns the integrity and consistency stages look for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    /// Column whose negative values are invalid
    pub age: String,
    /// Column that must equal the sum of `addends`
    pub total: String,
    pub addends: [String; 2],
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            age: "Age".to_string(),
            total: "Total".to_string(),
            addends: ["Part1".to_string(), "Part2".to_string()],
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub remove_duplicates: bool,
    pub fix_integrity: bool,
    pub standardize_text: bool,
    pub fix_consistency: bool,
    pub impute: ImputeConfig,
    pub remove_outliers: OutlierConfig,
    pub scale: ScaleConfig,
    pub encode: EncodeConfig,
    pub columns: ColumnRoles,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            fix_integrity: true,
            standardize_text: true,
            fix_consistency: true,
            impute: ImputeConfig::default(),
            remove_outliers: OutlierConfig::default(),
            scale: ScaleConfig::default(),
            encode: EncodeConfig::default(),
            columns: ColumnRoles::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration with every stage switched off
    pub fn none() -> Self {
        let mut config = Self::default();
        for stage in StageKind::ALL {
            config.set_enabled(stage, false);
        }
        config
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PrepError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PrepError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| PrepError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate().map_err(|message| PrepError::Config {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(config)
    }

    /// Check option values that the stages cannot work with
    pub fn validate(&self) -> std::result::Result<(), String> {
        let threshold = self.remove_outliers.threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(format!(
                "outlier threshold must be a positive number, got {}",
                threshold
            ));
        }
        Ok(())
    }

    pub fn is_enabled(&self, stage: StageKind) -> bool {
        match stage {
            StageKind::Deduplicate => self.remove_duplicates,
            StageKind::Integrity => self.fix_integrity,
            StageKind::TextNormalize => self.standardize_text,
            StageKind::Consistency => self.fix_consistency,
            StageKind::Impute => self.impute.enabled,
            StageKind::Outliers => self.remove_outliers.enabled,
            StageKind::Scale => self.scale.enabled,
            StageKind::Encode => self.encode.enabled,
        }
    }

    pub fn set_enabled(&mut self, stage: StageKind, enabled: bool) {
        match stage {
            StageKind::Deduplicate => self.remove_duplicates = enabled,
            StageKind::Integrity => self.fix_integrity = enabled,
            StageKind::TextNormalize => self.standardize_text = enabled,
            StageKind::Consistency => self.fix_consistency = enabled,
            StageKind::Impute => self.impute.enabled = enabled,
            StageKind::Outliers => self.remove_outliers.enabled = enabled,
            StageKind::Scale => self.scale.enabled = enabled,
            StageKind::Encode => self.encode.enabled = enabled,
        }
    }

    /// Enabled stages in execution order
    pub fn enabled_stages(&self) -> Vec<StageKind> {
        StageKind::ALL
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }
}
