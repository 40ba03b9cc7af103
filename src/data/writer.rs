//! Write tables back to CSV or Parquet

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::table::{CellValue, Table};

/// Output dtype of a column, decided from its present cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int64,
    Float64,
    String,
}

fn column_type(table: &Table, name: &str) -> ColumnType {
    table
        .rows()
        .iter()
        .map(|row| row.get(name))
        .filter(|cell| !cell.is_missing())
        .fold(ColumnType::Int64, |acc, cell| match (acc, cell) {
            (ColumnType::Int64, CellValue::Integer(_)) => ColumnType::Int64,
            (ColumnType::Int64 | ColumnType::Float64, CellValue::Integer(_) | CellValue::Number(_)) => {
                ColumnType::Float64
            }
            _ => ColumnType::String,
        })
}

/// Build a DataFrame from a table.
///
/// Integer-only columns become Int64, columns mixing integers and floats
/// become Float64 and everything else is written as String, so text that
/// merely looks numeric keeps its exact form. Missing cells become nulls.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|name| {
            let rows = table.rows();
            match column_type(table, name) {
                ColumnType::Int64 => {
                    let values: Vec<Option<i64>> = rows
                        .iter()
                        .map(|r| match r.get(name) {
                            CellValue::Integer(v) => Some(*v),
                            _ => None,
                        })
                        .collect();
                    Column::new(name.as_str().into(), values)
                }
                ColumnType::Float64 => {
                    let values: Vec<Option<f64>> = rows.iter().map(|r| r.numeric(name)).collect();
                    Column::new(name.as_str().into(), values)
                }
                ColumnType::String => {
                    let values: Vec<Option<String>> = rows.iter().map(|r| r.get(name).label()).collect();
                    Column::new(name.as_str().into(), values)
                }
            }
        })
        .collect();

    DataFrame::new(columns).context("Failed to assemble output DataFrame")
}

/// Save a table to file (CSV or Parquet based on extension)
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(&mut df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(&mut df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
