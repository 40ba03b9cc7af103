//! Storage backends for the defect registry

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::record::DefectRecord;

/// Load/save access to persisted defect records.
pub trait DefectRepository {
    fn load(&self) -> Result<Vec<DefectRecord>>;
    fn save(&mut self, records: &[DefectRecord]) -> Result<()>;
}

/// Records kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    records: Vec<DefectRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DefectRecord>) -> Self {
        Self { records }
    }
}

impl DefectRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<DefectRecord>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[DefectRecord]) -> Result<()> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// Records stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/sigmakit/defects.json`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("sigmakit"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("defects.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DefectRepository for JsonFileRepository {
    /// A missing file is an empty registry.
    fn load(&self) -> Result<Vec<DefectRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read defect store: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse defect store: {}", self.path.display()))
    }

    fn save(&mut self, records: &[DefectRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize defect records to JSON")?;

        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write defect store: {}", self.path.display()))?;

        Ok(())
    }
}
