//! Pearson correlation between paired numeric series

use serde::Serialize;

use super::error::{StatsError, StatsResult};
use crate::data::{Table, TabularRow};

/// Two equally long series paired element-wise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PairedSample {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl PairedSample {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Correlation between two columns of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub column_x: String,
    pub column_y: String,
    pub correlation: f64,
    /// Rows where both cells were numeric.
    pub pairs: usize,
}

/// Build (x, y) pairs from rows, skipping rows where either cell is not numeric.
pub fn paired_sample(rows: &[TabularRow], x_column: &str, y_column: &str) -> PairedSample {
    let (xs, ys) = rows
        .iter()
        .filter_map(|row| Some((row.numeric(x_column)?, row.numeric(y_column)?)))
        .unzip();
    PairedSample { xs, ys }
}

/// Pearson correlation coefficient.
///
/// Computed from deviations about the means,
/// `r = Σ(x−x̄)(y−ȳ) / sqrt(Σ(x−x̄)² · Σ(y−ȳ)²)`, which equals the raw-sum
/// form `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))` but keeps its
/// precision for values far from zero. A zero denominator (no variance in
/// either series) gives `0.0`. The result is clamped to `[-1, 1]` to absorb
/// rounding.
///
/// # Errors
/// - `InvalidInput` when the series differ in length or hold non-finite values.
/// - `InsufficientData` when the series are empty.
pub fn compute_pearson(xs: &[f64], ys: &[f64]) -> StatsResult<f64> {
    if xs.len() != ys.len() {
        return Err(StatsError::invalid(format!(
            "series must have equal length, got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(StatsError::insufficient("no paired values"));
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(StatsError::invalid("series contain non-finite values"));
    }

    let (Some(dx), Some(dy)) = (scaled_deviations(xs), scaled_deviations(ys)) else {
        return Ok(0.0);
    };

    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&x, &y) in dx.iter().zip(dy.iter()) {
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let denominator = (sum_x2 * sum_y2).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Ok(0.0);
    }

    Ok((sum_xy / denominator).clamp(-1.0, 1.0))
}

/// Deviations from the mean divided by the largest absolute deviation, so
/// every entry lies in `[-1, 1]`. `None` when the series has no variance.
///
/// r is invariant under positive scaling, which keeps the squared sums finite
/// for inputs near `f64::MAX`.
fn scaled_deviations(values: &[f64]) -> Option<Vec<f64>> {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let mean = if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    };

    let mut deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
    if deviations.iter().any(|d| !d.is_finite()) {
        // Span exceeds f64::MAX: halve both sides before subtracting
        deviations = values.iter().map(|v| v / 2.0 - mean / 2.0).collect();
    }

    let scale = deviations.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    if scale == 0.0 {
        return None;
    }
    Some(deviations.into_iter().map(|d| d / scale).collect())
}

/// Pearson correlation of two table columns.
pub fn correlate_pair(rows: &[TabularRow], x_column: &str, y_column: &str) -> StatsResult<CorrelatedPair> {
    let sample = paired_sample(rows, x_column, y_column);
    let correlation = compute_pearson(&sample.xs, &sample.ys)?;
    Ok(CorrelatedPair {
        column_x: x_column.to_string(),
        column_y: y_column.to_string(),
        correlation,
        pairs: sample.len(),
    })
}

/// Correlate every unordered pair of numeric columns.
///
/// Pairs without any common numeric row are skipped. Only pairs with
/// `|r| >= threshold` are kept, sorted by absolute correlation descending.
pub fn correlate_columns(table: &Table, threshold: f64) -> Vec<CorrelatedPair> {
    let numeric_cols = table.numeric_columns();
    let num_cols = numeric_cols.len();

    // Upper triangle
    let mut pairs: Vec<CorrelatedPair> = (0..num_cols)
        .flat_map(|i| ((i + 1)..num_cols).map(move |j| (i, j)))
        .filter_map(|(i, j)| correlate_pair(table.rows(), &numeric_cols[i], &numeric_cols[j]).ok())
        .filter(|pair| pair.correlation.abs() >= threshold)
        .collect();

    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pairs
}
