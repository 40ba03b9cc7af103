//! JSON export of analysis results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

/// Metadata about the analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// sigmakit version
    pub sigmakit_version: String,
    /// Subcommand that produced the result
    pub command: String,
    /// Input file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Analysed column(s)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl AnalysisMetadata {
    pub fn new(command: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            sigmakit_version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.to_string(),
            input_file: None,
            columns: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: &Path) -> Self {
        self.input_file = Some(input.display().to_string());
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }
}

/// Complete export: run metadata plus the serialized result
#[derive(Debug, Serialize)]
pub struct AnalysisExport<'a, T: Serialize> {
    pub metadata: AnalysisMetadata,
    pub result: &'a T,
}

/// Export an analysis result to a pretty-printed JSON file
///
/// # Arguments
/// * `result` - Any serializable engine result
/// * `metadata` - Run metadata written alongside the result
/// * `output_path` - Path to write the JSON file
pub fn export_analysis<T: Serialize>(
    result: &T,
    metadata: AnalysisMetadata,
    output_path: &Path,
) -> Result<()> {
    let export = AnalysisExport { metadata, result };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis result to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write analysis export to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
