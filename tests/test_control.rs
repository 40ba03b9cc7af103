//! Tests for X-bar / R control limits

use rand::Rng;
use sigmakit::stats::{compute_control_limits, control_constants, ChartKind, StatsError};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, THICKNESS};

#[test]
fn test_twelve_values_make_two_subgroups_of_five() {
    let limits = compute_control_limits(&THICKNESS, 5).unwrap();

    assert_eq!(limits.subgroup_count(), 2);
    assert_eq!(limits.discarded, 2, "two trailing values should be discarded");

    assert_close(limits.subgroup_means[0], 10.08, 1e-9, "first subgroup mean");
    assert_close(limits.subgroup_means[1], 10.02, 1e-9, "second subgroup mean");
    assert_close(limits.subgroup_ranges[0], 0.5, 1e-9, "first subgroup range");
    assert_close(limits.subgroup_ranges[1], 0.7, 1e-9, "second subgroup range");

    assert_close(limits.center_line_x, 10.05, 1e-9, "X-bar-bar");
    assert_close(limits.center_line_r, 0.6, 1e-9, "R-bar");
    assert_close(limits.ucl_x, 10.05 + 0.577 * 0.6, 1e-9, "UCL x");
    assert_close(limits.lcl_x, 10.05 - 0.577 * 0.6, 1e-9, "LCL x");
    assert_close(limits.ucl_r, 2.115 * 0.6, 1e-9, "UCL r");
    assert_eq!(limits.lcl_r, 0.0);
}

#[test]
fn test_too_few_values_is_insufficient_data() {
    let result = compute_control_limits(&[1.0, 2.0, 3.0, 4.0], 5);
    assert!(
        matches!(result, Err(StatsError::InsufficientData(_))),
        "expected InsufficientData, got {:?}",
        result
    );
}

#[test]
fn test_subgroup_size_outside_table_is_invalid() {
    for size in [0, 1, 11, 25] {
        let result = compute_control_limits(&THICKNESS, size);
        assert!(
            matches!(result, Err(StatsError::InvalidInput(_))),
            "size {} should be InvalidInput, got {:?}",
            size,
            result
        );
        assert!(control_constants(size).is_none());
    }
}

#[test]
fn test_constant_table_rows() {
    let n2 = control_constants(2).unwrap();
    assert_eq!((n2.a2, n2.d3, n2.d4), (1.880, 0.0, 3.267));

    let n7 = control_constants(7).unwrap();
    assert_eq!((n7.a2, n7.d3, n7.d4), (0.419, 0.076, 1.924));

    let n10 = control_constants(10).unwrap();
    assert_eq!((n10.a2, n10.d3, n10.d4), (0.308, 0.223, 1.777));
}

#[test]
fn test_positive_lower_range_limit_from_n7() {
    let sample: Vec<f64> = (0..21).map(|i| (i % 7) as f64).collect();
    let limits = compute_control_limits(&sample, 7).unwrap();

    assert_close(limits.center_line_r, 6.0, 1e-9, "R-bar");
    assert_close(limits.lcl_r, 0.076 * 6.0, 1e-9, "LCL r");
}

#[test]
fn test_shifted_subgroup_is_flagged() {
    let mut sample = Vec::new();
    for i in 0..8 {
        if i % 2 == 0 {
            sample.extend([1.0, 2.0]);
        } else {
            sample.extend([2.0, 1.0]);
        }
    }
    sample.extend([9.0, 10.0]);

    let limits = compute_control_limits(&sample, 2).unwrap();
    let signals = limits.signals();

    assert_eq!(signals.len(), 1, "only the shifted subgroup should signal: {:?}", signals);
    assert_eq!(signals[0].subgroup, 8);
    assert_eq!(signals[0].chart, ChartKind::Mean);
    assert!(signals[0].above_upper);
    assert!(!limits.is_in_control());
}

#[test]
fn test_control_limits_are_deterministic() {
    let first = compute_control_limits(&THICKNESS, 4).unwrap();
    let second = compute_control_limits(&THICKNESS, 4).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_random_samples_keep_limit_ordering() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let size = rng.gen_range(2..=10);
        let len = rng.gen_range(size..200);
        let sample: Vec<f64> = (0..len).map(|_| rng.gen_range(-50.0..50.0)).collect();

        let limits = compute_control_limits(&sample, size).unwrap();
        assert!(limits.lcl_r >= 0.0, "LCL r must be non-negative: {}", limits.lcl_r);
        assert!(limits.lcl_x <= limits.center_line_x);
        assert!(limits.center_line_x <= limits.ucl_x);
        assert_eq!(limits.subgroup_count() * size + limits.discarded, len);
    }
}
