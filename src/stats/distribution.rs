//! Histogram binning (Sturges' rule) and descriptive statistics

use serde::Serialize;

use super::error::{StatsError, StatsResult};

/// Descriptive statistics of a numeric sample.
///
/// Variance is the population variance (divides by `n`). The median of an
/// even-length sample is the upper-middle element of the sorted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// One histogram bin covering `[start, end)`; the last bin also holds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramResult {
    pub bins: Vec<HistogramBin>,
    /// Zero when the sample has no spread.
    pub bin_width: f64,
    pub stats: DescriptiveStats,
}

/// Number of bins by Sturges' rule: `ceil(1 + 3.322 * log10(n))`, at least 1.
pub fn sturges_bin_count(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let bins = (1.0 + 3.322 * (n as f64).log10()).ceil() as usize;
    bins.max(1)
}

/// Compute mean, median, population variance, standard deviation, min and max.
///
/// # Errors
/// `InsufficientData` for an empty sample, `InvalidInput` if any value is
/// not finite, `OutOfRange` when the variance overflows `f64` (values near
/// `±f64::MAX`).
pub fn describe(sample: &[f64]) -> StatsResult<DescriptiveStats> {
    if sample.is_empty() {
        return Err(StatsError::insufficient("sample is empty"));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::invalid("sample contains non-finite values"));
    }

    let n = sample.len();
    let mean = sample.iter().sum::<f64>() / n as f64;
    let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    if !mean.is_finite() || !variance.is_finite() {
        return Err(StatsError::out_of_range(
            "sample spread exceeds the representable range",
        ));
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(DescriptiveStats {
        n,
        mean,
        median: sorted[n / 2],
        variance,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
    })
}

/// Bin a sample into a Sturges histogram and attach its descriptive statistics.
///
/// # Errors
/// Same as [`describe`].
pub fn compute_histogram(sample: &[f64]) -> StatsResult<HistogramResult> {
    let stats = describe(sample)?;

    // Zero spread: one bin spanning the single value
    if stats.max == stats.min {
        return Ok(HistogramResult {
            bins: vec![HistogramBin {
                start: stats.min,
                end: stats.max,
                count: stats.n,
            }],
            bin_width: 0.0,
            stats,
        });
    }

    let bin_count = sturges_bin_count(stats.n);
    let bin_width = (stats.max - stats.min) / bin_count as f64;
    if !bin_width.is_finite() {
        return Err(StatsError::out_of_range("histogram range overflows f64"));
    }

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| {
            let start = stats.min + i as f64 * bin_width;
            HistogramBin {
                start,
                end: start + bin_width,
                count: 0,
            }
        })
        .collect();

    for &value in sample {
        let idx = ((value - stats.min) / bin_width).floor() as usize;
        bins[idx.min(bin_count - 1)].count += 1;
    }

    Ok(HistogramResult {
        bins,
        bin_width,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sturges_bin_count() {
        assert_eq!(sturges_bin_count(1), 1);
        assert_eq!(sturges_bin_count(2), 3); // 1 + 3.322 * 0.30103 = 2.00002
        assert_eq!(sturges_bin_count(10), 5); // 1 + 3.322 = 4.322
        assert_eq!(sturges_bin_count(100), 8); // 1 + 6.644
        assert_eq!(sturges_bin_count(1000), 11); // 1 + 9.966
    }

    #[test]
    fn test_median_even_length_takes_upper_middle() {
        let stats = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_median_odd_length() {
        let stats = describe(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            describe(&[1.0, f64::NAN]),
            Err(StatsError::InvalidInput(_))
        ));
    }
}
