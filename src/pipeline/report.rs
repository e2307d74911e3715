//! Per-stage diagnostics

use serde::{Deserialize, Serialize};

/// The cleaning stages, declared in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Deduplicate,
    Integrity,
    TextNormalize,
    Consistency,
    Impute,
    Outliers,
    Scale,
    Encode,
}

impl StageKind {
    /// Every stage, in the order the runner applies them
    pub const ALL: [StageKind; 8] = [
        StageKind::Deduplicate,
        StageKind::Integrity,
        StageKind::TextNormalize,
        StageKind::Consistency,
        StageKind::Impute,
        StageKind::Outliers,
        StageKind::Scale,
        StageKind::Encode,
    ];

    /// Human-readable title used in console output
    pub fn title(&self) -> &'static str {
        match self {
            StageKind::Deduplicate => "Remove Duplicates",
            StageKind::Integrity => "Integrity Repair",
            StageKind::TextNormalize => "Text Standardization",
            StageKind::Consistency => "Consistency Repair",
            StageKind::Impute => "Missing Values",
            StageKind::Outliers => "Outlier Removal",
            StageKind::Scale => "Feature Scaling",
            StageKind::Encode => "Categorical Encoding",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Why a stage had nothing to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Zero rows or zero columns
    EmptyDataset,
    /// The stage's named column(s) are absent or of the wrong kind
    MissingRequiredColumn { columns: Vec<String> },
    /// No column of the kind the stage works on
    NoEligibleColumns,
    /// Every row has a missing numeric value, so no statistic can be formed
    NoCompleteRows,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyDataset => write!(f, "dataset is empty"),
            SkipReason::MissingRequiredColumn { columns } => {
                write!(f, "required column(s) not found: {}", columns.join(", "))
            }
            SkipReason::NoEligibleColumns => write!(f, "no eligible columns"),
            SkipReason::NoCompleteRows => write!(f, "no rows without missing numeric values"),
        }
    }
}

/// Whether a stage ran or degraded to a no-op
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    Applied,
    Skipped(SkipReason),
}

/// What a single stage did to the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: StageKind,
    pub outcome: StageOutcome,
    pub rows_removed: usize,
    pub values_changed: usize,
    pub columns_added: usize,
    pub columns_removed: usize,
    /// Columns where a zero variance / zero range fallback was used
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degenerate_columns: Vec<String>,
    pub message: String,
}

impl StageReport {
    /// Report for a stage that ran; counts start at zero
    pub fn applied(stage: StageKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            outcome: StageOutcome::Applied,
            rows_removed: 0,
            values_changed: 0,
            columns_added: 0,
            columns_removed: 0,
            degenerate_columns: Vec::new(),
            message: message.into(),
        }
    }

    /// Zero-effect report for a stage that had nothing to work on
    pub fn skipped(stage: StageKind, reason: SkipReason) -> Self {
        tracing::warn!(stage = %stage, %reason, "stage skipped");
        let message = format!("Skipped: {}", reason);
        Self {
            outcome: StageOutcome::Skipped(reason),
            ..Self::applied(stage, message)
        }
    }

    pub fn with_rows_removed(mut self, rows: usize) -> Self {
        self.rows_removed = rows;
        self
    }

    pub fn with_values_changed(mut self, values: usize) -> Self {
        self.values_changed = values;
        self
    }

    pub fn with_columns(mut self, added: usize, removed: usize) -> Self {
        self.columns_added = added;
        self.columns_removed = removed;
        self
    }

    pub fn with_degenerate_columns(mut self, columns: Vec<String>) -> Self {
        self.degenerate_columns = columns;
        self
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, StageOutcome::Skipped(_))
    }

    /// True when the stage changed nothing
    pub fn is_noop(&self) -> bool {
        self.rows_removed == 0
            && self.values_changed == 0
            && self.columns_added == 0
            && self.columns_removed == 0
    }
}
