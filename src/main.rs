//! AutoPrep: Data Cleaning CLI Tool
//!
//! A command-line tool that cleans a CSV dataset through an ordered
//! preprocessing pipeline and writes the cleaned table back to disk.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;

use autoprep::cli::{self, confirm_overwrite, Cli, Commands};
use autoprep::pipeline::{load_dataset, save_dataset, Dataset, Pipeline, StageEvent};
use autoprep::report::{export_run_report, CleaningSummary, RunExportParams};
use autoprep::utils::{
    create_spinner, finish_stage, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_dataset_stats, print_info, print_preview,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Generate { output } => cli::generate::run_generate(output.as_deref()),
        };
    }

    // Main cleaning pipeline - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_path = cli
        .output_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive an output path from the input"))?;
    let config = cli.pipeline_config()?;

    // Print styled banner and configuration card
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, &output_path, &config);

    if output_path.exists() && !cli.no_confirm && !confirm_overwrite(&output_path)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Load dataset
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let dataset = load_dataset(input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let mut summary = CleaningSummary::new(dataset.summary());
    print_dataset_stats("Raw Dataset", &summary.before);
    if cli.preview > 0 {
        show_preview("Raw Data Preview", &dataset, cli.preview);
    }
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Run the enabled stages
    let pipeline = Pipeline::new(config.clone());
    if pipeline.stages().is_empty() {
        print_info("All stages are disabled; the dataset is written unchanged");
    }

    let mut step = 0;
    let mut active: Option<(ProgressBar, Instant)> = None;
    let outcome = pipeline.run_with(dataset, |event| match event {
        StageEvent::Started(stage) => {
            step += 1;
            print_step_header(step, stage.title());
            active = Some((create_spinner(&format!("{}...", stage.title())), Instant::now()));
        }
        StageEvent::Finished(report) => {
            if let Some((spinner, started)) = active.take() {
                finish_stage(&spinner, report);
                let elapsed = started.elapsed();
                print_step_time(elapsed);
                summary.add_stage(report.clone(), elapsed);
            }
        }
    })?;
    summary.set_after(outcome.after);

    print_dataset_stats("Cleaned Dataset", &outcome.after);
    if cli.preview > 0 {
        show_preview("Cleaned Data Preview", &outcome.dataset, cli.preview);
    }

    // Save output
    print_step_header(step + 1, "Save Results");

    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&outcome.dataset, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    if let Some(report_path) = &cli.report {
        let params = RunExportParams {
            input_file: input,
            output_file: &output_path,
            config: &config,
        };
        export_run_report(&outcome, report_path, &params)?;
        print_success(&format!("Run report written to {}", report_path.display()));
    }
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    // Display summary
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}

fn show_preview(title: &str, dataset: &Dataset, rows: usize) {
    let head = dataset.frame().head(Some(rows));
    print_preview(title, &head.to_string());
}
