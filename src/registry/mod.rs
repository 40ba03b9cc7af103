//! Defect registry - records, storage and summaries
//!
//! The registry owns the in-memory list and writes through to an injected
//! [`DefectRepository`]. A change only reaches the in-memory list once the
//! repository has saved it.

pub mod record;
pub mod repository;

pub use record::*;
pub use repository::*;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::stats::{build_pareto_series, compute_metrics, FrequencyTable, MetricsResult, ParetoEntry};

/// Registry contents broken down by type, priority and DMAIC phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    /// Defect types by frequency, with cumulative percentages.
    pub by_kind: Vec<ParetoEntry>,
    pub by_priority: Vec<(String, u64)>,
    pub by_dmaic: Vec<(String, u64)>,
}

pub struct DefectRegistry<R: DefectRepository> {
    repository: R,
    records: Vec<DefectRecord>,
}

impl<R: DefectRepository> DefectRegistry<R> {
    /// Load existing records from `repository`.
    pub fn open(repository: R) -> Result<Self> {
        let records = repository.load()?;
        Ok(Self {
            repository,
            records,
        })
    }

    pub fn records(&self) -> &[DefectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&DefectRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Register a defect and persist. The description is required.
    pub fn add(&mut self, fields: NewDefect) -> Result<&DefectRecord> {
        validate(&fields)?;

        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let mut records = self.records.clone();
        records.push(DefectRecord::new(id, Utc::now(), fields));
        self.commit(records)?;

        Ok(&self.records[self.records.len() - 1])
    }

    /// Replace the editable fields of a defect, keeping id and timestamp.
    pub fn update(&mut self, id: u64, fields: NewDefect) -> Result<&DefectRecord> {
        validate(&fields)?;

        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("Defect #{} not found", id))?;

        let mut records = self.records.clone();
        records[idx] = DefectRecord::new(id, records[idx].created_at, fields);
        self.commit(records)?;

        Ok(&self.records[idx])
    }

    /// Remove a defect; returns false when the id is unknown.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let records = self.records.iter().filter(|r| r.id != id).cloned().collect();
        self.commit(records)?;
        Ok(true)
    }

    fn commit(&mut self, records: Vec<DefectRecord>) -> Result<()> {
        self.repository.save(&records)?;
        self.records = records;
        Ok(())
    }

    pub fn summary(&self) -> RegistrySummary {
        let mut kinds = FrequencyTable::new();
        let mut priorities = FrequencyTable::new();
        let mut phases = FrequencyTable::new();

        for record in &self.records {
            let kind = record.kind.trim();
            kinds.increment(if kind.is_empty() { "unspecified" } else { kind });
            priorities.increment(record.priority.map_or("unset", |p| p.label()));
            phases.increment(record.dmaic.label());
        }

        RegistrySummary {
            total: self.records.len(),
            by_kind: build_pareto_series(&kinds),
            by_priority: owned_counts(&priorities),
            by_dmaic: owned_counts(&phases),
        }
    }

    /// Six Sigma metrics treating every registered defect as one defect
    /// observed over `units` units with `opportunities_per_unit` each.
    pub fn metrics(&self, units: f64, opportunities_per_unit: f64) -> Result<MetricsResult> {
        Ok(compute_metrics(
            self.records.len() as f64,
            units,
            opportunities_per_unit,
        )?)
    }
}

fn validate(fields: &NewDefect) -> Result<()> {
    if fields.description.trim().is_empty() {
        anyhow::bail!("A defect description is required");
    }
    Ok(())
}

fn owned_counts(table: &FrequencyTable) -> Vec<(String, u64)> {
    table.iter().map(|(k, c)| (k.to_string(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defect(kind: &str, description: &str) -> NewDefect {
        NewDefect {
            kind: kind.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_increase_after_removal() {
        let mut registry = DefectRegistry::open(MemoryRepository::new()).unwrap();
        registry.add(defect("a", "first")).unwrap();
        registry.add(defect("a", "second")).unwrap();
        assert!(registry.remove(1).unwrap());

        let third = registry.add(defect("b", "third")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut registry = DefectRegistry::open(MemoryRepository::new()).unwrap();
        let err = registry.add(defect("a", "   ")).unwrap_err();
        assert!(err.to_string().contains("description is required"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_timestamp() {
        let mut registry = DefectRegistry::open(MemoryRepository::new()).unwrap();
        let created_at = registry.add(defect("a", "first")).unwrap().created_at;

        let updated = registry.update(1, defect("b", "edited")).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.kind, "b");

        assert!(registry.update(99, defect("b", "missing")).is_err());
    }
}
