//! Error taxonomy for newsroom orchestration.

use std::path::PathBuf;

/// Errors that cross role boundaries and abort the current lead.
#[derive(Debug, thiserror::Error)]
pub enum NewsroomError {
    #[error("contract violation in {role}: {reason}")]
    ContractViolation { role: String, reason: String },

    #[error("no investigators available to {editor} for task {task_id}")]
    NoInvestigators { editor: String, task_id: String },

    #[error("plan for lead {lead_id} contains duplicate task id {task_id}")]
    DuplicateTask { lead_id: String, task_id: String },

    #[error("planning failed for lead {lead_id}: {reason}")]
    Planning { lead_id: String, reason: String },

    #[error("journal error at {path:?}: {source}")]
    Journal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NewsroomError {
    pub(crate) fn contract(role: &str, reason: impl Into<String>) -> Self {
        NewsroomError::ContractViolation {
            role: role.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn journal(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NewsroomError::Journal {
            path: path.into(),
            source,
        }
    }
}

/// Failure raised by a single investigation.
///
/// Contained at the worker boundary: it becomes a `failed` task status and is
/// never returned from [`crate::roles::Worker::run`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct InvestigationError {
    pub reason: String,
}

impl InvestigationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure raised by a decomposition policy.
///
/// The editor wraps it into [`NewsroomError::Planning`] with the lead id,
/// which aborts the lead before any task is assigned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct PlanningError {
    pub reason: String,
}

impl PlanningError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result type for newsroom operations.
pub type Result<T> = std::result::Result<T, NewsroomError>;
