//! Defect registry commands

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::args::DefectCommand;
use super::prompts::confirm_removal;
use crate::registry::{DefectRegistry, JsonFileRepository, RegistrySummary};
use crate::report::{
    display_defects, display_metrics, display_registry_summary, export_analysis, AnalysisMetadata,
};
use crate::stats::MetricsResult;
use crate::utils::{print_info, print_success};

#[derive(Debug, Serialize)]
struct RegistryExport<'a> {
    summary: &'a RegistrySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsResult>,
}

/// Run a registry action against the JSON store at `store`
/// (the per-user default when `None`).
pub fn run_defects(store: Option<&Path>, action: DefectCommand) -> Result<()> {
    let path = store
        .map(Path::to_path_buf)
        .unwrap_or_else(JsonFileRepository::default_path);
    let mut registry = DefectRegistry::open(JsonFileRepository::new(path.clone()))?;

    match action {
        DefectCommand::Add(fields) => {
            let record = registry.add(fields.into())?;
            print_success(&format!("Registered defect #{}", record.id));
            print_info(&format!("Store: {}", path.display()));
        }
        DefectCommand::Update { id, fields } => {
            registry.update(id, fields.into())?;
            print_success(&format!("Updated defect #{}", id));
        }
        DefectCommand::List => {
            display_defects(registry.records());
        }
        DefectCommand::Remove { id, yes } => {
            let description = match registry.get(id) {
                Some(record) => record.description.clone(),
                None => anyhow::bail!("Defect #{} not found in {}", id, path.display()),
            };
            if !yes && !confirm_removal(id, &description)? {
                print_info("Removal cancelled");
                return Ok(());
            }
            registry.remove(id)?;
            print_success(&format!("Removed defect #{}", id));
        }
        DefectCommand::Summary {
            units,
            opportunities,
            json,
        } => {
            let summary = registry.summary();
            display_registry_summary(&summary);

            let metrics = match units {
                Some(units) => Some(registry.metrics(units, opportunities)?),
                None => None,
            };
            if let Some(metrics) = &metrics {
                display_metrics(metrics);
            }

            if let Some(json) = json {
                let export = RegistryExport {
                    summary: &summary,
                    metrics,
                };
                export_analysis(
                    &export,
                    AnalysisMetadata::new("defects summary").with_input(&path),
                    &json,
                )?;
                print_success(&format!("Saved JSON export to {}", json.display()));
            }
        }
    }

    Ok(())
}
