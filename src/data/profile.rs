//! Column profiling and missing value analysis

use serde::Serialize;

use super::table::Table;
use crate::stats::{build_frequency_table, describe, DescriptiveStats};

/// Broad column type, decided from the cells actually present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// At least one cell is numeric.
    Numeric,
    /// Only non-numeric text cells are present.
    Categorical,
    /// Every cell is missing.
    Empty,
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub total: usize,
    pub missing: usize,
    pub missing_ratio: f64,
    pub distinct: usize,
    /// Descriptive statistics of the numeric cells (numeric columns only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DescriptiveStats>,
    /// Most frequent value (categorical columns only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Profile every column in table order.
pub fn profile_table(table: &Table) -> Vec<ColumnProfile> {
    table
        .columns()
        .iter()
        .map(|column| profile_column(table, column))
        .collect()
}

/// Profile a single column.
pub fn profile_column(table: &Table, column: &str) -> ColumnProfile {
    let total = table.height();
    let missing = table.rows().iter().filter(|r| r.is_missing(column)).count();
    let frequencies = build_frequency_table(table.rows(), column);
    let numbers = table.numeric_column(column);

    let (kind, stats, mode) = if !numbers.is_empty() {
        (ColumnKind::Numeric, describe(&numbers).ok(), None)
    } else if !frequencies.is_empty() {
        (
            ColumnKind::Categorical,
            None,
            frequencies.mode().map(str::to_string),
        )
    } else {
        (ColumnKind::Empty, None, None)
    };

    ColumnProfile {
        name: column.to_string(),
        kind,
        total,
        missing,
        missing_ratio: if total == 0 {
            0.0
        } else {
            missing as f64 / total as f64
        },
        distinct: frequencies.len(),
        stats,
        mode,
    }
}

/// Missing ratio of each column, sorted by ratio descending.
pub fn analyze_missing_values(table: &Table) -> Vec<(String, f64)> {
    // Handle empty table
    if table.is_empty() {
        return Vec::new();
    }

    let mut missing_ratios: Vec<(String, f64)> = profile_table(table)
        .into_iter()
        .map(|p| (p.name, p.missing_ratio))
        .collect();

    missing_ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    missing_ratios
}

/// Columns whose missing ratio is strictly above `threshold`.
pub fn get_columns_above_threshold(missing_ratios: &[(String, f64)], threshold: f64) -> Vec<String> {
    missing_ratios
        .iter()
        .filter(|(_, ratio)| *ratio > threshold)
        .map(|(name, _)| name.clone())
        .collect()
}
