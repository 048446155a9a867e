//! Pipeline state snapshots.
//!
//! A [`PipelineState`] is fetched fresh on every poll and dropped once the
//! frame has been drawn; nothing here is mutated after construction.

use std::fmt;

use chrono::{DateTime, Utc};

/// Latest execution status of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Succeeded,
    InProgress,
    Failed,
    Cancelled,
    Stopped,
    Stopping,
    Unknown,
}

impl ExecutionStatus {
    /// Every status the palette has a default color for.
    pub const KNOWN: [Self; 6] = [
        Self::Succeeded,
        Self::InProgress,
        Self::Failed,
        Self::Cancelled,
        Self::Stopped,
        Self::Stopping,
    ];

    /// Parse the CodePipeline wire string. Anything unrecognised (including
    /// `Abandoned`) is [`ExecutionStatus::Unknown`].
    pub fn parse(s: &str) -> Self {
        match s {
            "Succeeded" => Self::Succeeded,
            "InProgress" => Self::InProgress,
            "Failed" => Self::Failed,
            "Cancelled" => Self::Cancelled,
            "Stopped" => Self::Stopped,
            "Stopping" => Self::Stopping,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::InProgress => "InProgress",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Stopped => "Stopped",
            Self::Stopping => "Stopping",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageState {
    pub name: String,
    pub status: ExecutionStatus,
    /// Status text as reported by the API. Differs from `status.as_str()`
    /// only when the status is unknown to us.
    pub raw_status: String,
    /// `None` when the stage has never executed.
    pub last_status_change: Option<DateTime<Utc>>,
}

impl StageState {
    pub fn new(
        name: impl Into<String>,
        raw_status: impl Into<String>,
        last_status_change: Option<DateTime<Utc>>,
    ) -> Self {
        let raw_status = raw_status.into();
        Self {
            name: name.into(),
            status: ExecutionStatus::parse(&raw_status),
            raw_status,
            last_status_change,
        }
    }
}

/// Snapshot of a whole pipeline, stages in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub name: String,
    pub stages: Vec<StageState>,
}
