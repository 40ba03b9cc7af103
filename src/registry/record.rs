//! Defect records

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Defect priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// DMAIC project phase the defect is being worked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmaicPhase {
    #[default]
    Define,
    Measure,
    Analyze,
    Improve,
    Control,
}

impl DmaicPhase {
    pub fn label(&self) -> &'static str {
        match self {
            DmaicPhase::Define => "define",
            DmaicPhase::Measure => "measure",
            DmaicPhase::Analyze => "analyze",
            DmaicPhase::Improve => "improve",
            DmaicPhase::Control => "control",
        }
    }
}

/// Fields supplied when registering or editing a defect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDefect {
    pub kind: String,
    pub phase: String,
    pub description: String,
    pub impact: String,
    pub root_cause: String,
    pub priority: Option<Priority>,
    pub dmaic: DmaicPhase,
}

/// A registered defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    /// Defect type (e.g. "dimensional", "cosmetic").
    pub kind: String,
    /// Process phase or step where the defect was found.
    pub phase: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub impact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_cause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub dmaic: DmaicPhase,
}

impl DefectRecord {
    pub fn new(id: u64, created_at: DateTime<Utc>, fields: NewDefect) -> Self {
        Self {
            id,
            created_at,
            kind: fields.kind,
            phase: fields.phase,
            description: fields.description,
            impact: fields.impact,
            root_cause: fields.root_cause,
            priority: fields.priority,
            dmaic: fields.dmaic,
        }
    }
}
