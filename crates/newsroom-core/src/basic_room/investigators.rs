//! Stub investigators.

use serde_json::Value;

use crate::domain::error::InvestigationError;
use crate::domain::InvestigationTask;
use crate::roles::{Investigate, RoleIdentity};

/// Answers every task with `Dummy result for task <id> from <name>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoInvestigator;

impl Investigate for EchoInvestigator {
    fn investigate(
        &self,
        task: &InvestigationTask,
        role: &RoleIdentity,
    ) -> Result<Value, InvestigationError> {
        let name = role.name();
        role.info(format!(
            "Investigator {name} processing task: {} - {}",
            task.task_id, task.description
        ));
        let result = format!("Dummy result for task {} from {name}", task.task_id);
        role.info(format!("Investigator {name} completed task: {}", task.task_id));
        Ok(Value::String(result))
    }
}

/// Like [`EchoInvestigator`] with a different result text.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlternateInvestigator;

impl Investigate for AlternateInvestigator {
    fn investigate(
        &self,
        task: &InvestigationTask,
        role: &RoleIdentity,
    ) -> Result<Value, InvestigationError> {
        let name = role.name();
        role.info(format!(
            "Investigator {name} processing task: {} - {}",
            task.task_id, task.description
        ));
        let result = format!("Alternative dummy result for task {} from {name}", task.task_id);
        role.info(format!("Investigator {name} completed task: {}", task.task_id));
        Ok(Value::String(result))
    }
}
