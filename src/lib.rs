//! sigmakit: Six Sigma Metrics Library
//!
//! Process metrics (DPMO, yield, sigma level, RTY), X̄-R control limits,
//! histograms, Pearson correlation and Pareto analysis over tabular data,
//! plus a small defect registry.

pub mod cli;
pub mod data;
pub mod registry;
pub mod report;
pub mod stats;
pub mod utils;
