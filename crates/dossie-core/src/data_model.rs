//! Data Model: RunReport, TaskOutcome, TaskProof
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one pass of the task graph over a memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    /// Task titles joined in declaration order (ex: "Curar Programa→Escrever Release")
    pub pipeline_id: String,
    /// Generation service id
    pub generator: String,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn executed(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.status == TaskStatus::Executed)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.status != TaskStatus::Executed)
    }

    /// True when every task produced its output
    pub fn is_complete(&self) -> bool {
        self.skipped().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub title: String,
    pub output_key: String,
    #[serde(flatten)]
    pub status: TaskStatus,
    pub proof: Option<TaskProof>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    Executed,
    Skipped { missing: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProof {
    pub prompt_hash: String,
    pub output_hash: String,
    pub deterministic: bool,
    pub latency_ms: u64,
}
