//! sigmakit: Six Sigma metrics CLI tool
//!
//! A command-line tool for computing process metrics, control limits,
//! histograms, correlations and Pareto series from CSV or Parquet data.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use sigmakit::cli::{analyze, calculate, clean, clean_output_path, defects, Cli, Commands};
use sigmakit::utils::{print_banner, print_completion};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let infer_schema_length = cli.infer_schema_length;

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
    }

    let start = Instant::now();

    match cli.command {
        Commands::Metrics {
            defects,
            units,
            opportunities,
            table,
            json,
        } => calculate::run_metrics(defects, units, opportunities, table, json.as_deref())?,
        Commands::Histogram {
            input,
            column,
            json,
        } => analyze::run_histogram(&input, &column, json.as_deref(), infer_schema_length)?,
        Commands::Control {
            input,
            column,
            all: _,
            subgroup_size,
            json,
        } => analyze::run_control(
            &input,
            column.as_deref(),
            subgroup_size,
            json.as_deref(),
            infer_schema_length,
        )?,
        Commands::Correlate {
            input,
            x_column,
            y_column,
            all: _,
            threshold,
            json,
        } => {
            let pair = x_column.as_deref().zip(y_column.as_deref());
            analyze::run_correlate(&input, pair, threshold, json.as_deref(), infer_schema_length)?
        }
        Commands::Pareto {
            input,
            column,
            value_column,
            top,
            json,
        } => analyze::run_pareto(
            &input,
            &column,
            value_column.as_deref(),
            top,
            json.as_deref(),
            infer_schema_length,
        )?,
        Commands::Profile {
            input,
            missing_threshold,
            json,
        } => analyze::run_profile(&input, missing_threshold, json.as_deref(), infer_schema_length)?,
        Commands::Clean {
            input,
            strategy,
            output,
        } => {
            let output_path = clean_output_path(&input, output.as_deref());
            clean::run_clean(&input, strategy, &output_path, infer_schema_length)?
        }
        Commands::Defects { store, action } => defects::run_defects(store.as_deref(), action)?,
    }

    if !cli.quiet {
        print_completion("Done");
        println!(
            "    {}",
            style(format!("Finished in {:.2}s", start.elapsed().as_secs_f64())).dim()
        );
    }

    Ok(())
}
