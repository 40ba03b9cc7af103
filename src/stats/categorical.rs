//! Frequency tables and Pareto series for categorical columns

use std::collections::HashMap;

use serde::Serialize;

use crate::data::TabularRow;

/// Label used for categories folded together by [`build_value_pareto`].
pub const OTHER_CATEGORY: &str = "Other";

/// Default number of categories kept before folding into [`OTHER_CATEGORY`].
pub const DEFAULT_PARETO_TOP: usize = 20;

/// Category counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit counts (e.g. manually entered Pareto data).
    /// Repeated categories are summed.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (category, count) in counts {
            table.add(category, count);
        }
        table
    }

    pub fn increment(&mut self, category: impl Into<String>) {
        self.add(category, 1);
    }

    pub fn add(&mut self, category: impl Into<String>, count: u64) {
        let category = category.into();
        match self.index.get(&category) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(category.clone(), self.entries.len());
                self.entries.push((category, count));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Most frequent category; the first seen wins ties.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (category, count) in self.iter() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }
}

/// Count present values of `column`. Missing cells are ignored.
pub fn build_frequency_table(rows: &[TabularRow], column: &str) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for label in rows.iter().filter_map(|row| row.get(column).label()) {
        table.increment(label);
    }
    table
}

/// One bar of a Pareto chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoEntry {
    pub category: String,
    pub count: u64,
    /// Share of the total, percent.
    pub percent: f64,
    pub cumulative_percent: f64,
}

/// Sort categories by count descending (ties keep first-seen order) and
/// accumulate percentages. An empty or all-zero table yields no entries.
pub fn build_pareto_series(table: &FrequencyTable) -> Vec<ParetoEntry> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<(&str, u64)> = table.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let total = total as f64;
    let mut accumulated = 0u64;
    sorted
        .into_iter()
        .map(|(category, count)| {
            accumulated += count;
            ParetoEntry {
                category: category.to_string(),
                count,
                percent: count as f64 * 100.0 / total,
                cumulative_percent: accumulated as f64 * 100.0 / total,
            }
        })
        .collect()
}

/// One bar of a value-weighted Pareto chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueParetoEntry {
    pub category: String,
    /// Sum of the value column for this category.
    pub value: f64,
    /// Rows that contributed to `value`.
    pub rows: usize,
    pub cumulative_percent: f64,
    /// True for the folded [`OTHER_CATEGORY`] entry.
    pub is_other: bool,
}

/// Pareto series weighted by a value column.
///
/// Categories are trimmed; rows with a blank category or an unparseable value
/// are skipped. Values are read after stripping every character except
/// digits, `.` and `-` (so `"$1,200"` reads as 1200). Categories beyond the
/// first `top_n` by summed value are folded into one [`OTHER_CATEGORY`]
/// entry. A non-positive grand total yields no entries.
pub fn build_value_pareto(
    rows: &[TabularRow],
    category_column: &str,
    value_column: &str,
    top_n: usize,
) -> Vec<ValueParetoEntry> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let category = match row.get(category_column).label() {
            Some(label) => label.trim().to_string(),
            None => continue,
        };
        if category.is_empty() {
            continue;
        }
        let Some(value) = cleaned_number(row, value_column) else {
            continue;
        };

        match index.get(&category) {
            Some(&i) => {
                groups[i].1 += value;
                groups[i].2 += 1;
            }
            None => {
                index.insert(category.clone(), groups.len());
                groups.push((category, value, 1));
            }
        }
    }

    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut entries: Vec<ValueParetoEntry> = Vec::new();
    let mut other_value = 0.0;
    let mut other_rows = 0;
    for (i, (category, value, count)) in groups.into_iter().enumerate() {
        if i < top_n {
            entries.push(ValueParetoEntry {
                category,
                value,
                rows: count,
                cumulative_percent: 0.0,
                is_other: false,
            });
        } else {
            other_value += value;
            other_rows += count;
        }
    }
    if other_rows > 0 {
        entries.push(ValueParetoEntry {
            category: OTHER_CATEGORY.to_string(),
            value: other_value,
            rows: other_rows,
            cumulative_percent: 0.0,
            is_other: true,
        });
    }

    let total: f64 = entries.iter().map(|e| e.value).sum();
    if total <= 0.0 || !total.is_finite() {
        return Vec::new();
    }

    let mut accumulated = 0.0;
    for entry in &mut entries {
        accumulated += entry.value;
        entry.cumulative_percent = accumulated * 100.0 / total;
    }

    entries
}

fn cleaned_number(row: &TabularRow, column: &str) -> Option<f64> {
    let cell = row.get(column);
    if let Some(v) = cell.as_f64() {
        return Some(v);
    }
    let raw = cell.label()?;
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    leading_number(&cleaned)
}

/// Longest numeric prefix of `s`: optional sign, digits, one decimal point.
/// `"1.2.3"` reads as 1.2 and `"12-5"` as 12.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_digit = false;
    let mut seen_point = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let table = FrequencyTable::from_counts([("z", 1), ("a", 2), ("z", 4)]);
        let order: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["z", "a"]);
        assert_eq!(table.get("z"), Some(5));
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_mode_first_seen_wins_tie() {
        let table = FrequencyTable::from_counts([("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(table.mode(), Some("b"));
        assert_eq!(FrequencyTable::new().mode(), None);
    }

    #[test]
    fn test_cleaned_number_strips_symbols() {
        let row = TabularRow::new().with("v", "$1,200.50");
        assert_eq!(cleaned_number(&row, "v"), Some(1200.5));

        let row = TabularRow::new().with("v", "n/a");
        assert_eq!(cleaned_number(&row, "v"), None);
    }

    #[test]
    fn test_cleaned_number_reads_leading_number() {
        let read = |text: &str| cleaned_number(&TabularRow::new().with("v", text), "v");

        assert_eq!(read("1.2.3"), Some(1.2));
        assert_eq!(read("12-5"), Some(12.0));
        assert_eq!(read("EUR -4.5"), Some(-4.5));
        assert_eq!(read(".5"), Some(0.5));
        assert_eq!(read("7."), Some(7.0));
        assert_eq!(read("-"), None);
        assert_eq!(read("-.x"), None);
        assert_eq!(read("--3"), None);
    }
}
