//! Investigation tasks: decomposed, independently assignable pieces of a lead.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::error::{NewsroomError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Done,
    Failed,
}

impl TaskStatus {
    /// `Done` and `Failed` are final.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Done => "done",
            TaskStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A unit of delegated work.
///
/// Created pending and unassigned by the editor, stamped with an assignee at
/// assignment, and moved to a terminal status by the investigator that runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationTask {
    pub task_id: String,
    pub description: String,
    pub content: String,
    /// Empty until assignment.
    pub assigned_to: String,
    pub status: TaskStatus,
    pub result: Option<serde_json::Value>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
}

impl InvestigationTask {
    pub fn new(
        task_id: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            description: description.into(),
            content: content.into(),
            assigned_to: String::new(),
            status: TaskStatus::Pending,
            result: None,
            failure_reason: None,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Terminal success. No-op on an already terminal task.
    pub fn complete(&mut self, result: serde_json::Value) {
        if self.status.is_terminal() {
            return;
        }
        self.result = Some(result);
        self.status = TaskStatus::Done;
        self.completed_at = Some(Local::now());
    }

    /// Terminal failure. No-op on an already terminal task.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.failure_reason = Some(reason.into());
        self.status = TaskStatus::Failed;
        self.completed_at = Some(Local::now());
    }

    /// A task handed to an investigator needs an id and must not be terminal.
    pub fn validate(&self, role: &str) -> Result<()> {
        if self.task_id.trim().is_empty() {
            return Err(NewsroomError::contract(role, "task id must not be empty"));
        }
        if self.status.is_terminal() {
            return Err(NewsroomError::contract(
                role,
                format!("task {} is already {}", self.task_id, self.status),
            ));
        }
        Ok(())
    }
}
