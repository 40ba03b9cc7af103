//! Tests for dataset loading

use sigmakit::data::{dataframe_to_table, load_dataset, load_table_with_progress, CellValue};

#[path = "common/mod.rs"]
mod common;

use common::THICKNESS;

#[test]
fn test_load_csv_into_table() {
    let mut df = common::create_process_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let loaded = load_dataset(&csv_path, 10000).unwrap();
    assert_eq!(loaded.shape(), (12, 6));

    let table = dataframe_to_table(&loaded);
    assert_eq!(
        table.columns(),
        &["line", "thickness", "weight", "defect_type", "cost", "temperature"]
    );
    assert_eq!(table.height(), 12);
    assert_eq!(table.numeric_column("thickness"), THICKNESS.to_vec());
    assert_eq!(
        table.numeric_column("temperature").len(),
        9,
        "null temperatures should be dropped from the numeric sample"
    );
    assert!(table.rows()[2].is_missing("defect_type"));
    assert_eq!(table.rows()[0].get("cost"), &CellValue::from("$120.50"));
}

#[test]
fn test_load_parquet_into_table() {
    let mut df = common::create_process_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (table, rows, cols) = load_table_with_progress(&parquet_path, 10000).unwrap();
    assert_eq!((rows, cols), (12, 6));
    assert_eq!(table.numeric_column("weight").len(), 12);
    assert_eq!(
        table.numeric_columns(),
        vec!["thickness", "weight", "temperature"]
    );
    assert_eq!(
        table.categorical_columns(),
        vec!["line", "defect_type", "cost"]
    );
}

#[test]
fn test_full_scan_schema_inference() {
    let mut df = common::create_process_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let loaded = load_dataset(&csv_path, 0).unwrap();
    assert_eq!(loaded.height(), 12);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("data.xlsx");
    std::fs::write(&path, "not a spreadsheet").unwrap();

    let err = load_dataset(&path, 10000).unwrap_err();
    assert!(
        err.to_string().contains("Unsupported file format"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    assert!(load_dataset(&path, 10000).is_err());
}
