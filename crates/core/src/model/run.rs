use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
    Cancelled,
}

/// Shape of the frame one completed stage produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: String,
    pub rows: usize,
    pub columns: usize,
}

/// In-memory record of one pipeline run. Runs are not persisted; the record
/// exists so drivers can report what happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    pub id: Uuid,
    #[serde(default)]
    pub seed: Option<u64>,
    pub status: RunStatus,
    pub stages: Vec<StageOutcome>,
    #[serde(default)]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
