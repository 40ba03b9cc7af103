//! Tests for histogram binning and descriptive statistics

use rand::Rng;
use sigmakit::stats::{compute_histogram, describe, sturges_bin_count, StatsError};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, THICKNESS};

#[test]
fn test_empty_sample_is_insufficient_data() {
    assert!(matches!(
        compute_histogram(&[]),
        Err(StatsError::InsufficientData(_))
    ));
    assert!(matches!(describe(&[]), Err(StatsError::InsufficientData(_))));
}

#[test]
fn test_constant_sample_has_single_bin() {
    let histogram = compute_histogram(&[5.0, 5.0, 5.0, 5.0]).unwrap();

    assert_eq!(histogram.bins.len(), 1, "zero spread should give one bin");
    assert_eq!(histogram.bins[0].count, 4);
    assert_eq!(histogram.bins[0].start, 5.0);
    assert_eq!(histogram.stats.std_dev, 0.0);
    assert_eq!(histogram.stats.mean, 5.0);
}

#[test]
fn test_bin_count_follows_sturges() {
    let sample: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let histogram = compute_histogram(&sample).unwrap();

    assert_eq!(sturges_bin_count(100), 8);
    assert_eq!(histogram.bins.len(), 8);
    assert_close(histogram.bin_width, 99.0 / 8.0, 1e-12, "bin width");
}

#[test]
fn test_maximum_lands_in_last_bin() {
    let histogram = compute_histogram(&THICKNESS).unwrap();
    let last = histogram.bins.last().unwrap();

    assert!(last.count >= 1, "the maximum value must be counted in the last bin");
    assert_close(last.end, 10.6, 1e-9, "last bin end");
    assert_close(histogram.bins[0].start, 9.7, 1e-12, "first bin start");
}

#[test]
fn test_values_on_bin_edges_are_counted_once() {
    // 11 values give 5 bins of width 2; every even value sits on an edge
    let sample: Vec<f64> = (0..=10).map(f64::from).collect();
    let histogram = compute_histogram(&sample).unwrap();

    assert_eq!(histogram.bins.len(), 5);
    assert_close(histogram.bin_width, 2.0, 1e-12, "bin width");

    let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![2, 2, 2, 2, 3], "edges open the next bin, max closes the last");
    assert_eq!(counts.iter().sum::<usize>(), sample.len());
}

#[test]
fn test_histogram_is_deterministic() {
    let first = compute_histogram(&THICKNESS).unwrap();
    let second = compute_histogram(&THICKNESS).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_spread_beyond_f64_is_out_of_range() {
    for sample in [vec![-1e308, 1e308], vec![0.0, f64::MAX]] {
        assert!(matches!(
            compute_histogram(&sample),
            Err(StatsError::OutOfRange(_))
        ));
    }
}

#[test]
fn test_descriptive_statistics() {
    let stats = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();

    assert_eq!(stats.n, 4);
    assert_close(stats.mean, 2.5, 1e-12, "mean");
    assert_close(stats.variance, 1.25, 1e-12, "population variance");
    assert_close(stats.std_dev, 1.25f64.sqrt(), 1e-12, "std dev");
    // Upper-middle element for even n
    assert_eq!(stats.median, 3.0);
    assert_eq!((stats.min, stats.max), (1.0, 4.0));
}

#[test]
fn test_non_finite_values_rejected() {
    assert!(matches!(
        describe(&[1.0, f64::NAN]),
        Err(StatsError::InvalidInput(_))
    ));
}

#[test]
fn test_random_counts_sum_to_sample_size() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let n = rng.gen_range(1..500);
        let sample: Vec<f64> = (0..n).map(|_| rng.gen_range(-1000.0..1000.0)).collect();

        let histogram = compute_histogram(&sample).unwrap();
        let total: usize = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, n, "bin counts should sum to n");
        assert!(histogram.stats.min <= histogram.stats.median);
        assert!(histogram.stats.median <= histogram.stats.max);
    }
}
