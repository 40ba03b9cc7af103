//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use sigmakit::data::{Table, TabularRow};
use std::path::PathBuf;
use tempfile::TempDir;

/// Thickness measurements of 12 consecutive parts (two subgroups of 5 plus 2
/// leftover values).
pub const THICKNESS: [f64; 12] = [
    10.1, 10.3, 9.8, 10.0, 10.2, 9.9, 10.4, 10.1, 9.7, 10.0, 10.2, 10.6,
];

/// Create a process DataFrame with known characteristics for testing
///
/// This DataFrame includes:
/// - `line`: Production line label (categorical)
/// - `thickness`: Clean numeric measurements
/// - `weight`: Roughly 2x thickness (strong positive correlation)
/// - `defect_type`: Categorical with two missing cells
/// - `cost`: Currency text such as "$120.50"
/// - `temperature`: Numeric with three missing cells
pub fn create_process_dataframe() -> DataFrame {
    df! {
        "line" => ["A", "A", "B", "B", "A", "C", "B", "A", "C", "A", "B", "A"],
        "thickness" => THICKNESS,
        "weight" => [20.3f64, 20.5, 19.7, 20.1, 20.3, 19.9, 20.9, 20.2, 19.3, 20.1, 20.5, 21.1],
        "defect_type" => [Some("scratch"), Some("dent"), None, Some("scratch"), Some("crack"),
                          Some("scratch"), Some("dent"), None, Some("scratch"), Some("dent"),
                          Some("scratch"), Some("crack")],
        "cost" => ["$120.50", "$80", "$15", "$120", "$300", "$99.50", "$80", "$0", "$45", "$80", "$10", "$310"],
        "temperature" => [Some(180.0f64), Some(182.0), None, Some(179.5), Some(181.0), None,
                          Some(180.5), Some(183.0), Some(178.0), None, Some(181.5), Some(180.0)],
    }
    .unwrap()
}

/// Small table of defect observations built directly from rows
///
/// Categories: A x3, B x5, C x2 (the Pareto example), plus one missing.
pub fn create_defect_table() -> Table {
    let kinds = ["A", "B", "B", "A", "C", "B", "A", "B", "C", "B", ""];
    let rows: Vec<TabularRow> = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            TabularRow::new()
                .with("kind", *kind)
                .with("minutes", (i + 1) as f64)
        })
        .collect();
    Table::new(vec!["kind".to_string(), "minutes".to_string()], rows)
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tolerance,
        "{} should be {}, got {}",
        what,
        expected,
        actual
    );
}
