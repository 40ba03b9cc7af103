//! Six Sigma quality metrics from defect, unit and opportunity counts.
//!
//! Formulas:
//!
//! | Metric        | Formula                                        |
//! |---------------|------------------------------------------------|
//! | DPU           | `defects / units`                              |
//! | DPMO          | `defects / (units * opportunities) * 1e6`      |
//! | Process yield | `(1 - defects / (units * opportunities)) * 100`|
//! | Sigma level   | `0.8406 + sqrt(29.37 - 2.221 * ln(DPMO))`      |
//! | RTY           | `exp(-DPU) * 100`                              |
//! | DPM           | `defects / units * 1e6`                        |
//!
//! The sigma level uses the Bothe approximation of the inverse normal
//! transform (including the conventional 1.5 sigma shift).

use serde::Serialize;

use super::error::{StatsError, StatsResult};

/// Lower clamp applied to DPMO before taking its logarithm.
pub const DPMO_EPSILON: f64 = 1e-6;

const BOTHE_OFFSET: f64 = 0.8406;
const BOTHE_INTERCEPT: f64 = 29.37;
const BOTHE_SLOPE: f64 = 2.221;

/// Every metric except the sigma level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DefectRates {
    pub dpu: f64,
    /// Defects per opportunity (fraction, not scaled).
    pub dpo: f64,
    pub dpmo: f64,
    /// Percent of opportunities without a defect.
    pub process_yield: f64,
    /// Rolled throughput yield, percent.
    pub rty: f64,
    pub dpm: f64,
}

/// Complete Six Sigma metric set for one process observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsResult {
    pub dpu: f64,
    pub dpmo: f64,
    pub process_yield: f64,
    pub sigma_level: f64,
    pub rty: f64,
    pub dpm: f64,
}

impl MetricsResult {
    /// Sigma levels still missing to reach six sigma (never negative).
    pub fn gap_to_six_sigma(&self) -> f64 {
        (6.0 - self.sigma_level).max(0.0)
    }

    pub fn rating(&self) -> SigmaRating {
        SigmaRating::from_sigma(self.sigma_level)
    }
}

/// Compute DPU, DPMO, yield, RTY and DPM.
///
/// # Errors
/// `InvalidInput` when `units <= 0`, `opportunities_per_unit <= 0`,
/// `defects < 0`, any argument is not finite, or a rate overflows.
pub fn defect_rates(
    defects: f64,
    units: f64,
    opportunities_per_unit: f64,
) -> StatsResult<DefectRates> {
    if !defects.is_finite() || !units.is_finite() || !opportunities_per_unit.is_finite() {
        return Err(StatsError::invalid("defects, units and opportunities must be finite numbers"));
    }
    if units <= 0.0 {
        return Err(StatsError::invalid(format!(
            "units must be greater than zero, got {}",
            units
        )));
    }
    if opportunities_per_unit <= 0.0 {
        return Err(StatsError::invalid(format!(
            "opportunities per unit must be greater than zero, got {}",
            opportunities_per_unit
        )));
    }
    if defects < 0.0 {
        return Err(StatsError::invalid(format!(
            "defects must not be negative, got {}",
            defects
        )));
    }

    let opportunities = units * opportunities_per_unit;
    if !opportunities.is_finite() {
        return Err(StatsError::invalid("total opportunities overflow"));
    }

    let dpu = defects / units;
    let dpo = defects / opportunities;
    let rates = DefectRates {
        dpu,
        dpo,
        dpmo: dpo * 1_000_000.0,
        process_yield: (1.0 - dpo) * 100.0,
        rty: (-dpu).exp() * 100.0,
        dpm: dpu * 1_000_000.0,
    };

    if !(rates.dpmo.is_finite() && rates.dpm.is_finite() && rates.process_yield.is_finite()) {
        return Err(StatsError::invalid(format!(
            "defect rates overflow for {} defects over {} units",
            defects, units
        )));
    }

    Ok(rates)
}

/// Sigma level for a DPMO value (Bothe approximation).
///
/// DPMO is clamped to [`DPMO_EPSILON`] so a defect-free process yields a
/// large finite sigma instead of infinity.
///
/// # Errors
/// - `InvalidInput` for a negative or non-finite DPMO.
/// - `OutOfRange` when `29.37 - 2.221 * ln(dpmo)` is negative
///   (roughly DPMO above 552,000).
pub fn sigma_level(dpmo: f64) -> StatsResult<f64> {
    if !dpmo.is_finite() || dpmo < 0.0 {
        return Err(StatsError::invalid(format!(
            "DPMO must be a finite non-negative number, got {}",
            dpmo
        )));
    }

    let radicand = BOTHE_INTERCEPT - BOTHE_SLOPE * dpmo.max(DPMO_EPSILON).ln();
    if radicand < 0.0 {
        return Err(StatsError::out_of_range(format!(
            "sigma level is undefined for DPMO {:.0} (radicand {:.4} is negative)",
            dpmo, radicand
        )));
    }

    Ok(BOTHE_OFFSET + radicand.sqrt())
}

/// Compute the full metric set.
///
/// # Example
/// ```
/// use sigmakit::stats::compute_metrics;
///
/// let m = compute_metrics(50.0, 100.0, 5.0).unwrap();
/// assert!((m.dpmo - 100_000.0).abs() < 1e-6);
/// assert!((m.process_yield - 90.0).abs() < 1e-9);
/// ```
pub fn compute_metrics(
    defects: f64,
    units: f64,
    opportunities_per_unit: f64,
) -> StatsResult<MetricsResult> {
    let rates = defect_rates(defects, units, opportunities_per_unit)?;
    let sigma = sigma_level(rates.dpmo)?;

    Ok(MetricsResult {
        dpu: rates.dpu,
        dpmo: rates.dpmo,
        process_yield: rates.process_yield,
        sigma_level: sigma,
        rty: rates.rty,
        dpm: rates.dpm,
    })
}

/// Qualitative band for a sigma level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SigmaRating {
    /// Below 3σ.
    NeedsImprovement,
    /// 3σ up to 4σ.
    Average,
    /// 4σ up to 5σ.
    Good,
    /// 5σ and above.
    Excellent,
}

impl SigmaRating {
    pub fn from_sigma(sigma: f64) -> Self {
        if sigma < 3.0 {
            SigmaRating::NeedsImprovement
        } else if sigma < 4.0 {
            SigmaRating::Average
        } else if sigma < 5.0 {
            SigmaRating::Good
        } else {
            SigmaRating::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SigmaRating::NeedsImprovement => "Needs improvement",
            SigmaRating::Average => "Average",
            SigmaRating::Good => "Good",
            SigmaRating::Excellent => "Excellent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SigmaRating::NeedsImprovement => {
                "High variability and frequent defects; the process needs significant improvement."
            }
            SigmaRating::Average => {
                "Typical industry performance with clear room for improvement."
            }
            SigmaRating::Good => "Well managed process with few defects.",
            SigmaRating::Excellent => "High quality process with very few defects.",
        }
    }
}

/// One row of the long-term sigma conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SigmaConversion {
    pub sigma: u8,
    pub dpmo: f64,
    /// Percent.
    pub process_yield: f64,
}

/// Standard long-term conversion table (1.5σ shift), ordered from 1σ to 6σ.
pub const SIGMA_CONVERSION_TABLE: [SigmaConversion; 6] = [
    SigmaConversion { sigma: 1, dpmo: 933_200.0, process_yield: 6.68 },
    SigmaConversion { sigma: 2, dpmo: 308_537.0, process_yield: 69.1463 },
    SigmaConversion { sigma: 3, dpmo: 66_807.0, process_yield: 93.3193 },
    SigmaConversion { sigma: 4, dpmo: 6_210.0, process_yield: 99.379 },
    SigmaConversion { sigma: 5, dpmo: 233.0, process_yield: 99.9767 },
    SigmaConversion { sigma: 6, dpmo: 3.4, process_yield: 99.99966 },
];

/// Whole sigma level looked up from [`SIGMA_CONVERSION_TABLE`].
///
/// Returns the level of the first row (from 1σ upward) whose DPMO the value
/// reaches, or 6 when the value is below every row.
pub fn tabulated_sigma_level(dpmo: f64) -> StatsResult<u8> {
    if !dpmo.is_finite() || dpmo < 0.0 {
        return Err(StatsError::invalid(format!(
            "DPMO must be a finite non-negative number, got {}",
            dpmo
        )));
    }

    Ok(SIGMA_CONVERSION_TABLE
        .iter()
        .find(|row| dpmo >= row.dpmo)
        .map(|row| row.sigma)
        .unwrap_or(6))
}
