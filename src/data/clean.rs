//! Missing value cleaning: drop incomplete rows or fill the gaps

use clap::ValueEnum;
use serde::Serialize;

use super::profile::{profile_column, ColumnKind};
use super::table::{CellValue, Table};

/// How to treat missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanStrategy {
    /// Remove every row with at least one missing cell
    Drop,
    /// Fill numeric columns with their mean and text columns with their mode
    Fill,
}

/// What a cleaning pass changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanSummary {
    pub strategy: CleanStrategy,
    pub rows_before: usize,
    pub rows_after: usize,
    pub cells_filled: usize,
    /// Columns left untouched because every cell was missing.
    pub skipped_columns: Vec<String>,
}

/// Apply `strategy` and return the cleaned table.
pub fn clean_table(table: &Table, strategy: CleanStrategy) -> (Table, CleanSummary) {
    match strategy {
        CleanStrategy::Drop => drop_incomplete_rows(table),
        CleanStrategy::Fill => fill_missing(table),
    }
}

fn drop_incomplete_rows(table: &Table) -> (Table, CleanSummary) {
    let rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| table.columns().iter().all(|col| !row.is_missing(col)))
        .cloned()
        .collect();

    let summary = CleanSummary {
        strategy: CleanStrategy::Drop,
        rows_before: table.height(),
        rows_after: rows.len(),
        cells_filled: 0,
        skipped_columns: Vec::new(),
    };

    (Table::new(table.columns().to_vec(), rows), summary)
}

fn fill_missing(table: &Table) -> (Table, CleanSummary) {
    let mut rows = table.rows().to_vec();
    let mut cells_filled = 0;
    let mut skipped_columns = Vec::new();

    for column in table.columns() {
        let profile = profile_column(table, column);
        if profile.missing == 0 {
            continue;
        }

        let fill = match (profile.kind, profile.stats, profile.mode) {
            (ColumnKind::Numeric, Some(stats), _) => CellValue::Number(stats.mean),
            (ColumnKind::Categorical, _, Some(mode)) => CellValue::Text(mode),
            _ => {
                skipped_columns.push(column.clone());
                continue;
            }
        };

        for row in rows.iter_mut().filter(|r| r.is_missing(column)) {
            row.set(column.clone(), fill.clone());
            cells_filled += 1;
        }
    }

    let summary = CleanSummary {
        strategy: CleanStrategy::Fill,
        rows_before: table.height(),
        rows_after: rows.len(),
        cells_filled,
        skipped_columns,
    };

    (Table::new(table.columns().to_vec(), rows), summary)
}
