//! Six Sigma metrics from defect, unit and opportunity counts

use std::path::Path;

use anyhow::Result;

use crate::report::{display_conversion_table, display_metrics, export_analysis, AnalysisMetadata};
use crate::stats::{compute_metrics, tabulated_sigma_level};
use crate::utils::print_success;

/// Run the metrics calculator
///
/// # Arguments
/// * `defects` - Defects observed
/// * `units` - Units inspected
/// * `opportunities` - Defect opportunities per unit
/// * `show_table` - Also print the sigma conversion table
/// * `json` - Optional JSON export path
pub fn run_metrics(
    defects: f64,
    units: f64,
    opportunities: f64,
    show_table: bool,
    json: Option<&Path>,
) -> Result<()> {
    let metrics = compute_metrics(defects, units, opportunities)?;
    display_metrics(&metrics);

    if show_table {
        let level = tabulated_sigma_level(metrics.dpmo)?;
        display_conversion_table(Some(level));
    }

    if let Some(path) = json {
        export_analysis(&metrics, AnalysisMetadata::new("metrics"), path)?;
        print_success(&format!("Saved JSON export to {}", path.display()));
    }

    Ok(())
}
