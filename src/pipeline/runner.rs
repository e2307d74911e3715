//! Pipeline runner - applies the enabled stages in their fixed order

use super::config::PipelineConfig;
use super::consistency::fix_totals;
use super::dataset::{Dataset, DatasetSummary};
use super::dedup::remove_duplicates;
use super::encode::one_hot_encode;
use super::error::Result;
use super::impute::handle_missing_values;
use super::integrity::fix_negative_values;
use super::outliers::remove_outliers;
use super::report::{StageKind, StageReport};
use super::scale::scale_numeric;
use super::text::standardize_text;

/// Progress notification emitted around every stage
#[derive(Debug)]
pub enum StageEvent<'a> {
    Started(StageKind),
    Finished(&'a StageReport),
}

/// Everything the sink receives after a run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub dataset: Dataset,
    pub before: DatasetSummary,
    pub after: DatasetSummary,
    /// One report per executed stage, in execution order
    pub reports: Vec<StageReport>,
}

impl PipelineOutcome {
    pub fn report_for(&self, stage: StageKind) -> Option<&StageReport> {
        self.reports.iter().find(|r| r.stage == stage)
    }
}

/// A configured cleaning pipeline.
///
/// The dataset is taken by value and handed back inside the
/// [`PipelineOutcome`], so nothing else can touch it while stages run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stages that will run, in order
    pub fn stages(&self) -> Vec<StageKind> {
        self.config.enabled_stages()
    }

    /// Run all enabled stages
    pub fn run(&self, dataset: Dataset) -> Result<PipelineOutcome> {
        self.run_with(dataset, |_| {})
    }

    /// Run all enabled stages, calling `observer` before and after each one
    pub fn run_with<F>(&self, dataset: Dataset, mut observer: F) -> Result<PipelineOutcome>
    where
        F: FnMut(StageEvent<'_>),
    {
        let mut dataset = dataset;
        let before = dataset.summary();
        let mut reports = Vec::new();

        for stage in self.stages() {
            observer(StageEvent::Started(stage));
            let report = self.run_stage(stage, &mut dataset)?;
            tracing::info!(
                stage = %stage,
                rows_removed = report.rows_removed,
                values_changed = report.values_changed,
                rows = dataset.height(),
                columns = dataset.width(),
                "{}",
                report.message
            );
            observer(StageEvent::Finished(&report));
            reports.push(report);
        }

        let after = dataset.summary();
        Ok(PipelineOutcome {
            dataset,
            before,
            after,
            reports,
        })
    }

    /// Apply a single stage with this pipeline's options, regardless of
    /// whether it is enabled
    pub fn run_stage(&self, stage: StageKind, dataset: &mut Dataset) -> Result<StageReport> {
        let config = &self.config;
        match stage {
            StageKind::Deduplicate => remove_duplicates(dataset),
            StageKind::Integrity => fix_negative_values(dataset, &config.columns.age),
            StageKind::TextNormalize => standardize_text(dataset),
            StageKind::Consistency => {
                let [first, second] = &config.columns.addends;
                fix_totals(
                    dataset,
                    &config.columns.total,
                    [first.as_str(), second.as_str()],
                )
            }
            StageKind::Impute => handle_missing_values(dataset, config.impute.strategy),
            StageKind::Outliers => remove_outliers(dataset, config.remove_outliers.threshold),
            StageKind::Scale => scale_numeric(dataset, config.scale.method),
            StageKind::Encode => one_hot_encode(
                dataset,
                config.encode.drop_first,
                config.encode.columns.as_deref(),
            ),
        }
    }
}
