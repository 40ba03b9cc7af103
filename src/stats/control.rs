//! X̄-R control limits for subgrouped samples.
//!
//! The sample is cut into consecutive subgroups of a fixed size; a short
//! trailing remainder is discarded. Limits use the Shewhart constants:
//!
//! - X̄ chart: `CL = X̿`, `UCL/LCL = X̿ ± A2 · R̄`
//! - R chart:  `CL = R̄`, `UCL = D4 · R̄`, `LCL = D3 · R̄`
//!
//! Limits are computed once from every subgroup. Points outside the limits
//! are reported by [`ControlLimits::signals`] but never removed.

use serde::Serialize;

use super::error::{StatsError, StatsResult};

/// Smallest subgroup size with tabulated constants.
pub const MIN_SUBGROUP_SIZE: usize = 2;
/// Largest subgroup size with tabulated constants.
pub const MAX_SUBGROUP_SIZE: usize = 10;

// Indexed by subgroup size - 2.
const A2: [f64; 9] = [1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308];
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];
const D4: [f64; 9] = [3.267, 2.575, 2.282, 2.115, 2.004, 1.924, 1.864, 1.816, 1.777];

/// Control chart constants for one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlConstants {
    pub a2: f64,
    pub d3: f64,
    pub d4: f64,
}

/// Look up A2/D3/D4 for `subgroup_size`, `None` outside 2..=10.
pub fn control_constants(subgroup_size: usize) -> Option<ControlConstants> {
    if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&subgroup_size) {
        return None;
    }
    let idx = subgroup_size - MIN_SUBGROUP_SIZE;
    Some(ControlConstants {
        a2: A2[idx],
        d3: D3[idx],
        d4: D4[idx],
    })
}

/// Which chart a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Mean,
    Range,
}

/// A subgroup statistic outside its control limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSignal {
    /// Zero-based subgroup index.
    pub subgroup: usize,
    pub chart: ChartKind,
    pub value: f64,
    pub above_upper: bool,
}

/// X̄-R chart center lines, limits and plotted points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlLimits {
    pub subgroup_size: usize,
    pub constants: ControlConstants,
    pub center_line_x: f64,
    pub ucl_x: f64,
    pub lcl_x: f64,
    pub center_line_r: f64,
    pub ucl_r: f64,
    pub lcl_r: f64,
    pub subgroup_means: Vec<f64>,
    pub subgroup_ranges: Vec<f64>,
    /// Trailing values that did not fill a subgroup.
    pub discarded: usize,
}

impl ControlLimits {
    pub fn subgroup_count(&self) -> usize {
        self.subgroup_means.len()
    }

    /// Subgroups whose mean or range falls outside the limits, in subgroup
    /// order, mean signal before range signal.
    pub fn signals(&self) -> Vec<ControlSignal> {
        let mut signals = Vec::new();

        for (i, (&mean, &range)) in self
            .subgroup_means
            .iter()
            .zip(self.subgroup_ranges.iter())
            .enumerate()
        {
            if mean > self.ucl_x || mean < self.lcl_x {
                signals.push(ControlSignal {
                    subgroup: i,
                    chart: ChartKind::Mean,
                    value: mean,
                    above_upper: mean > self.ucl_x,
                });
            }
            if range > self.ucl_r || range < self.lcl_r {
                signals.push(ControlSignal {
                    subgroup: i,
                    chart: ChartKind::Range,
                    value: range,
                    above_upper: range > self.ucl_r,
                });
            }
        }

        signals
    }

    pub fn is_in_control(&self) -> bool {
        self.signals().is_empty()
    }
}

/// Compute X̄-R control limits.
///
/// # Errors
/// - `InvalidInput` when `subgroup_size` is outside 2..=10 or the sample
///   contains a non-finite value.
/// - `InsufficientData` when fewer than `subgroup_size` values are given.
pub fn compute_control_limits(sample: &[f64], subgroup_size: usize) -> StatsResult<ControlLimits> {
    let constants = control_constants(subgroup_size).ok_or_else(|| {
        StatsError::invalid(format!(
            "subgroup size must be between {} and {}, got {}",
            MIN_SUBGROUP_SIZE, MAX_SUBGROUP_SIZE, subgroup_size
        ))
    })?;

    if sample.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::invalid("sample contains non-finite values"));
    }

    let subgroups = sample.chunks_exact(subgroup_size);
    let discarded = subgroups.remainder().len();

    let (subgroup_means, subgroup_ranges): (Vec<f64>, Vec<f64>) = subgroups
        .map(|subgroup| (mean(subgroup), subgroup_range(subgroup)))
        .unzip();

    if subgroup_means.is_empty() {
        return Err(StatsError::insufficient(format!(
            "need at least {} values for one subgroup, got {}",
            subgroup_size,
            sample.len()
        )));
    }

    let x_bar_bar = mean(&subgroup_means);
    let r_bar = mean(&subgroup_ranges);

    Ok(ControlLimits {
        subgroup_size,
        constants,
        center_line_x: x_bar_bar,
        ucl_x: x_bar_bar + constants.a2 * r_bar,
        lcl_x: x_bar_bar - constants.a2 * r_bar,
        center_line_r: r_bar,
        ucl_r: constants.d4 * r_bar,
        lcl_r: constants.d3 * r_bar,
        subgroup_means,
        subgroup_ranges,
        discarded,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn subgroup_range(subgroup: &[f64]) -> f64 {
    let max = subgroup.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = subgroup.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_table_bounds() {
        assert!(control_constants(1).is_none());
        assert!(control_constants(11).is_none());

        let n2 = control_constants(2).unwrap();
        assert_eq!(n2.a2, 1.880);
        assert_eq!(n2.d4, 3.267);

        let n10 = control_constants(10).unwrap();
        assert_eq!(n10.d3, 0.223);
    }

    #[test]
    fn test_d3_is_zero_up_to_six() {
        for n in 2..=6 {
            assert_eq!(control_constants(n).unwrap().d3, 0.0, "n = {}", n);
        }
        for n in 7..=10 {
            assert!(control_constants(n).unwrap().d3 > 0.0, "n = {}", n);
        }
    }

    #[test]
    fn test_subgroup_range() {
        assert_eq!(subgroup_range(&[3.0, 9.0, 1.0]), 8.0);
        assert_eq!(subgroup_range(&[4.0, 4.0]), 0.0);
    }
}
