//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::table::{CellValue, Table, TabularRow};
use crate::utils::{create_spinner, finish_with_success};

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Input file
/// * `infer_schema_length` - Rows used for CSV schema inference, 0 for a full scan
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Convert a DataFrame into engine rows, preserving column order.
pub fn dataframe_to_table(df: &DataFrame) -> Table {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = vec![TabularRow::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series().rechunk();
        for (row, value) in rows.iter_mut().zip(series.iter()) {
            row.set(name.clone(), any_value_to_cell(value));
        }
    }

    Table::new(columns, rows)
}

/// Integers stay exact and dates or times keep their display form, so a
/// cleaned file can be written back without changing its values.
fn any_value_to_cell(value: AnyValue) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Empty,
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        AnyValue::Boolean(b) => CellValue::Text(b.to_string()),
        other if other.dtype().is_temporal() => CellValue::Text(other.to_string()),
        other if other.dtype().is_integer() => match other.extract::<i64>() {
            Some(v) => CellValue::Integer(v),
            // u64 beyond i64::MAX
            None => numeric_or_text(other),
        },
        other => numeric_or_text(other),
    }
}

fn numeric_or_text(value: AnyValue) -> CellValue {
    match value.extract::<f64>() {
        Some(v) => CellValue::Number(v),
        None => CellValue::Text(value.to_string()),
    }
}

/// Load a file into a [`Table`] with a spinner, returning the table and its shape.
pub fn load_table_with_progress(path: &Path, infer_schema_length: usize) -> Result<(Table, usize, usize)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let df = load_dataset(path, infer_schema_length)?;
    let (rows, cols) = df.shape();
    let table = dataframe_to_table(&df);
    finish_with_success(&spinner, &format!("Loaded {} rows x {} columns", rows, cols));
    Ok((table, rows, cols))
}
