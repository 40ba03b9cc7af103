//! Dataset analysis commands: histogram, control limits, correlation, Pareto, profile

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::data::{
    analyze_missing_values, get_columns_above_threshold, load_table_with_progress, profile_table,
    Table,
};
use crate::report::{
    display_control_limits, display_correlations, display_histogram, display_pareto,
    display_profiles, display_value_pareto, export_analysis, AnalysisMetadata,
};
use crate::stats::{
    build_frequency_table, build_pareto_series, build_value_pareto, compute_control_limits,
    compute_histogram, correlate_columns, correlate_pair, ControlLimits, StatsError,
};
use crate::utils::{
    print_count, print_info, print_input, print_step_header, print_success, print_warning,
};

/// Control limits of one column, as exported.
#[derive(Debug, Serialize)]
pub struct ColumnControlLimits {
    pub column: String,
    #[serde(flatten)]
    pub limits: ControlLimits,
}

/// Load the input file, print the input card and check the named columns exist.
fn load_input(input: &Path, columns: &[&str], infer_schema_length: usize) -> Result<Table> {
    print_step_header(1, "Load Data");
    let (table, rows, cols) = load_table_with_progress(input, infer_schema_length)?;
    print_input(input, columns.first().copied(), rows, cols);

    for column in columns {
        table.require_column(column)?;
    }
    Ok(table)
}

/// Numeric values of a column, warning about cells that were not numbers.
fn numeric_sample(table: &Table, column: &str) -> Vec<f64> {
    let values = table.numeric_column(column);
    let present = table
        .rows()
        .iter()
        .filter(|row| !row.is_missing(column))
        .count();

    if present > values.len() {
        print_warning(&format!(
            "Skipped {} non-numeric value(s) in '{}'",
            present - values.len(),
            column
        ));
    }
    values
}

fn write_export<T: Serialize>(result: &T, metadata: AnalysisMetadata, json: Option<&Path>) -> Result<()> {
    if let Some(path) = json {
        export_analysis(result, metadata, path)?;
        print_success(&format!("Saved JSON export to {}", path.display()));
    }
    Ok(())
}

pub fn run_histogram(
    input: &Path,
    column: &str,
    json: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let table = load_input(input, &[column], infer_schema_length)?;

    print_step_header(2, "Distribution");
    let values = numeric_sample(&table, column);
    let histogram = compute_histogram(&values)?;
    display_histogram(column, &histogram);

    write_export(
        &histogram,
        AnalysisMetadata::new("histogram")
            .with_input(input)
            .with_columns([column]),
        json,
    )
}

/// Compute control limits for one column, or for every numeric column when
/// `column` is `None`. Columns without a full subgroup are skipped with a
/// warning in the all-columns mode.
pub fn run_control(
    input: &Path,
    column: Option<&str>,
    subgroup_size: usize,
    json: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let requested: Vec<&str> = column.into_iter().collect();
    let table = load_input(input, &requested, infer_schema_length)?;

    print_step_header(2, "Control Limits");
    let columns = match column {
        Some(c) => vec![c.to_string()],
        None => table.numeric_columns(),
    };
    if columns.is_empty() {
        anyhow::bail!("No numeric columns found in {}", input.display());
    }

    let mut charts = Vec::with_capacity(columns.len());
    for name in &columns {
        let values = numeric_sample(&table, name);
        match compute_control_limits(&values, subgroup_size) {
            Ok(limits) => {
                display_control_limits(name, &limits);
                charts.push(ColumnControlLimits {
                    column: name.clone(),
                    limits,
                });
            }
            Err(e @ StatsError::InsufficientData(_)) if column.is_none() => {
                print_warning(&format!("Skipping '{}': {}", name, e));
            }
            Err(e) => return Err(e.into()),
        }
    }

    if column.is_none() {
        print_count("column(s) charted", charts.len(), None);
    }

    write_export(
        &charts,
        AnalysisMetadata::new("control")
            .with_input(input)
            .with_columns(columns),
        json,
    )
}

pub fn run_correlate(
    input: &Path,
    pair: Option<(&str, &str)>,
    threshold: f64,
    json: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let requested: Vec<&str> = pair.map(|(x, y)| vec![x, y]).unwrap_or_default();
    let table = load_input(input, &requested, infer_schema_length)?;

    print_step_header(2, "Correlation");
    let pairs = match pair {
        Some((x, y)) => {
            let result = correlate_pair(table.rows(), x, y)?;
            if result.pairs < table.height() {
                print_info(&format!(
                    "{} of {} rows have numeric values in both columns",
                    result.pairs,
                    table.height()
                ));
            }
            vec![result]
        }
        None => {
            let pairs = correlate_columns(&table, threshold);
            print_count(
                "column pair(s)",
                pairs.len(),
                Some(&format!("(|r| >= {:.2})", threshold)),
            );
            pairs
        }
    };
    display_correlations(&pairs);

    write_export(
        &pairs,
        AnalysisMetadata::new("correlate")
            .with_input(input)
            .with_columns(requested),
        json,
    )
}

pub fn run_pareto(
    input: &Path,
    column: &str,
    value_column: Option<&str>,
    top: usize,
    json: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let mut requested = vec![column];
    requested.extend(value_column);
    let table = load_input(input, &requested, infer_schema_length)?;

    print_step_header(2, "Pareto Analysis");
    let metadata = AnalysisMetadata::new("pareto")
        .with_input(input)
        .with_columns(requested);

    match value_column {
        Some(value_column) => {
            let entries = build_value_pareto(table.rows(), column, value_column, top);
            display_value_pareto(column, value_column, &entries);
            write_export(&entries, metadata, json)
        }
        None => {
            let frequencies = build_frequency_table(table.rows(), column);
            print_count("distinct categories", frequencies.len(), None);
            let entries = build_pareto_series(&frequencies);
            display_pareto(column, &entries);
            write_export(&entries, metadata, json)
        }
    }
}

pub fn run_profile(
    input: &Path,
    missing_threshold: f64,
    json: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let table = load_input(input, &[], infer_schema_length)?;

    print_step_header(2, "Column Profile");
    let profiles = profile_table(&table);
    display_profiles(&profiles);

    let missing = analyze_missing_values(&table);
    let flagged = get_columns_above_threshold(&missing, missing_threshold);
    if flagged.is_empty() {
        print_info("No columns exceed the missing value threshold");
    } else {
        print_count(
            "column(s) with high missing values",
            flagged.len(),
            Some(&format!("(>{:.1}%)", missing_threshold * 100.0)),
        );
    }

    write_export(
        &profiles,
        AnalysisMetadata::new("profile").with_input(input),
        json,
    )
}
