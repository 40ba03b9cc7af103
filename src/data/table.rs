//! In-memory tabular data: cells, rows and tables
//!
//! Rows are produced by the loader (or built directly) and are never mutated
//! by the statistics engine.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

/// A single cell as read from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Whole number read from an integer column, kept exact.
    Integer(i64),
    Number(f64),
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// True for `Empty` and for text that is blank after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Integer(_) | CellValue::Number(_) => false,
        }
    }

    /// Finite numeric value of the cell, parsing text when needed.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(v) => *v,
            CellValue::Integer(v) => *v as f64,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Category label, `None` for missing cells.
    pub fn label(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// One record: column name to cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularRow {
    cells: HashMap<String, CellValue>,
}

impl TabularRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Cell for `column`; absent columns read as `Empty`.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.get(column).as_f64()
    }

    pub fn is_missing(&self, column: &str) -> bool {
        self.get(column).is_missing()
    }
}

impl<K, V> FromIterator<(K, V)> for TabularRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Numeric sample of a column: non-numeric and missing cells are dropped.
pub fn numeric_values(rows: &[TabularRow], column: &str) -> Vec<f64> {
    rows.iter().filter_map(|row| row.numeric(column)).collect()
}

/// Rows with their column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<TabularRow>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<TabularRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TabularRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TabularRow> {
        self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with the list of available columns when `column` is unknown.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if !self.has_column(column) {
            anyhow::bail!(
                "Column '{}' not found in dataset. Available columns: {:?}",
                column,
                self.columns
            );
        }
        Ok(())
    }

    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        numeric_values(&self.rows, column)
    }

    /// Columns holding at least one numeric cell.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| self.rows.iter().any(|row| row.numeric(col).is_some()))
            .cloned()
            .collect()
    }

    /// Columns holding at least one present, non-numeric cell.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| {
                self.rows.iter().any(|row| {
                    let cell = row.get(col);
                    !cell.is_missing() && cell.as_f64().is_none()
                })
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_cells_parse_as_numbers() {
        assert_eq!(CellValue::from(" 4.5 ").as_f64(), Some(4.5));
        assert_eq!(CellValue::from("-3").as_f64(), Some(-3.0));
        assert_eq!(CellValue::from("abc").as_f64(), None);
        assert_eq!(CellValue::from("NaN").as_f64(), None);
        assert_eq!(CellValue::from("inf").as_f64(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
    }

    #[test]
    fn test_missing_cells() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::from("   ").is_missing());
        assert!(!CellValue::from("x").is_missing());
        assert!(!CellValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_absent_column_reads_as_empty() {
        let row = TabularRow::new().with("a", 1.0);
        assert_eq!(row.get("b"), &CellValue::Empty);
        assert!(row.is_missing("b"));
    }

    #[test]
    fn test_number_labels() {
        assert_eq!(CellValue::Number(3.0).label().as_deref(), Some("3"));
        assert_eq!(CellValue::Number(2.5).label().as_deref(), Some("2.5"));
        assert_eq!(
            CellValue::Integer(12_345_678_901_234_567).label().as_deref(),
            Some("12345678901234567")
        );
        assert_eq!(CellValue::Empty.label(), None);
    }

    #[test]
    fn test_column_classification() {
        let rows = vec![
            TabularRow::new().with("num", 1.0).with("mixed", "a").with("cat", "x"),
            TabularRow::new().with("num", "2").with("mixed", 3.0).with("cat", "y"),
        ];
        let table = Table::new(
            vec!["num".into(), "mixed".into(), "cat".into()],
            rows,
        );

        assert_eq!(table.numeric_columns(), vec!["num", "mixed"]);
        assert_eq!(table.categorical_columns(), vec!["mixed", "cat"]);
        assert_eq!(table.numeric_column("mixed"), vec![3.0]);
    }
}
