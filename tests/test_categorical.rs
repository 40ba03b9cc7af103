//! Tests for frequency tables and Pareto series

use sigmakit::data::TabularRow;
use sigmakit::stats::{
    build_frequency_table, build_pareto_series, build_value_pareto, FrequencyTable, OTHER_CATEGORY,
};

#[path = "common/mod.rs"]
mod common;

use common::assert_close;

#[test]
fn test_pareto_orders_by_count_with_cumulative_percent() {
    let table = FrequencyTable::from_counts([("A", 3), ("B", 5), ("C", 2)]);
    let series = build_pareto_series(&table);

    let categories: Vec<&str> = series.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(categories, vec!["B", "A", "C"]);

    let cumulative: Vec<f64> = series.iter().map(|e| e.cumulative_percent).collect();
    assert_close(cumulative[0], 50.0, 1e-9, "first cumulative percent");
    assert_close(cumulative[1], 80.0, 1e-9, "second cumulative percent");
    assert_close(cumulative[2], 100.0, 1e-9, "last cumulative percent");
}

#[test]
fn test_pareto_of_table_rows_ignores_missing() {
    let table = common::create_defect_table();
    let frequencies = build_frequency_table(table.rows(), "kind");

    assert_eq!(frequencies.total(), 10, "the blank category must not be counted");
    assert_eq!(frequencies.get("B"), Some(5));
    assert_eq!(frequencies.mode(), Some("B"));

    let series = build_pareto_series(&frequencies);
    assert_eq!(series[0].category, "B");
    assert_close(series[0].percent, 50.0, 1e-9, "B percent");
}

#[test]
fn test_ties_keep_first_seen_order() {
    let table = FrequencyTable::from_counts([("late", 2), ("early", 4), ("first", 2)]);
    let series = build_pareto_series(&table);

    let categories: Vec<&str> = series.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(categories, vec!["early", "late", "first"]);
}

#[test]
fn test_empty_table_gives_empty_series() {
    assert!(build_pareto_series(&FrequencyTable::new()).is_empty());
    assert!(build_pareto_series(&FrequencyTable::from_counts([("A", 0)])).is_empty());
}

#[test]
fn test_cumulative_percent_is_monotone_and_ends_at_100() {
    let table = FrequencyTable::from_counts((0..37).map(|i| (format!("cat{}", i), (i * 7 % 11 + 1) as u64)));
    let series = build_pareto_series(&table);

    for window in series.windows(2) {
        assert!(window[0].count >= window[1].count);
        assert!(window[0].cumulative_percent <= window[1].cumulative_percent);
    }
    assert_close(series.last().unwrap().cumulative_percent, 100.0, 1e-9, "final cumulative");
}

#[test]
fn test_pareto_is_deterministic() {
    let table = common::create_defect_table();
    let frequencies = build_frequency_table(table.rows(), "kind");

    assert_eq!(build_pareto_series(&frequencies), build_pareto_series(&frequencies));
}

#[test]
fn test_value_pareto_folds_tail_into_other() {
    let rows = vec![
        TabularRow::new().with("cause", "Setup ").with("cost", "$1,200"),
        TabularRow::new().with("cause", "Material").with("cost", 300.0),
        TabularRow::new().with("cause", "Setup").with("cost", "800"),
        TabularRow::new().with("cause", "Operator").with("cost", "$150.50"),
        TabularRow::new().with("cause", "Tooling").with("cost", "49.5"),
        TabularRow::new().with("cause", "   ").with("cost", "999"),
        TabularRow::new().with("cause", "Tooling").with("cost", "n/a"),
    ];

    let entries = build_value_pareto(&rows, "cause", "cost", 2);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].category, "Setup", "categories are trimmed and merged");
    assert_close(entries[0].value, 2000.0, 1e-9, "Setup total");
    assert_eq!(entries[0].rows, 2);
    assert_eq!(entries[1].category, "Material");

    let other = &entries[2];
    assert!(other.is_other);
    assert_eq!(other.category, OTHER_CATEGORY);
    assert_close(other.value, 200.0, 1e-9, "Other total");
    assert_eq!(other.rows, 2);
    assert_close(other.cumulative_percent, 100.0, 1e-9, "final cumulative");
    assert_close(entries[0].cumulative_percent, 2000.0 * 100.0 / 2500.0, 1e-9, "first cumulative");
}

#[test]
fn test_value_pareto_without_values_is_empty() {
    let rows = vec![TabularRow::new().with("cause", "Setup").with("cost", "none")];
    assert!(build_value_pareto(&rows, "cause", "cost", 20).is_empty());
}
