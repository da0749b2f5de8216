//! Investigators: roles that execute a single task.

use chrono::Local;
use serde_json::Value;

use crate::domain::error::{InvestigationError, Result};
use crate::domain::{InvestigationTask, TaskStatus};
use crate::journal::Channel;
use crate::roles::role::{RoleIdentity, Runnable};

/// Investigation strategy plugged into a [`Worker`].
///
/// Receives the worker's identity, so results and log lines can name the
/// investigator doing the work. Returns the result payload, or the reason the
/// investigation failed; the worker applies the outcome to the task.
///
/// # Example
///
/// ```ignore
/// let worker = Worker::new(|task: &InvestigationTask, role: &RoleIdentity| {
///     role.info(format!("looking into {}", task.task_id));
///     Ok(Value::String(format!("{} by {}", task.task_id, role.name())))
/// });
/// ```
pub trait Investigate: Send {
    fn investigate(
        &self,
        task: &InvestigationTask,
        role: &RoleIdentity,
    ) -> std::result::Result<Value, InvestigationError>;
}

impl<F> Investigate for F
where
    F: Fn(&InvestigationTask, &RoleIdentity) -> std::result::Result<Value, InvestigationError>
        + Send,
{
    fn investigate(
        &self,
        task: &InvestigationTask,
        role: &RoleIdentity,
    ) -> std::result::Result<Value, InvestigationError> {
        self(task, role)
    }
}

/// Executes one task at a time. A failed investigation is recorded on the
/// task and never aborts the caller.
pub struct Worker {
    identity: RoleIdentity,
    investigator: Box<dyn Investigate>,
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl Worker {
    /// Default name of an investigator.
    pub const KIND: &'static str = "Investigator";

    /// An investigator named [`Worker::KIND`] with a private quiet channel.
    pub fn new(investigator: impl Investigate + 'static) -> Self {
        Self {
            identity: RoleIdentity::new(Self::KIND, None),
            investigator: Box::new(investigator),
        }
    }

    /// Rename the investigator. See [`RoleIdentity::renamed`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.identity = self.identity.renamed(name);
        self
    }

    pub fn with_journal_dir(mut self, journal_dir: Option<std::path::PathBuf>) -> Self {
        self.identity = self.identity.with_journal_dir(journal_dir);
        self
    }

    /// Log through `channel`, typically one shared with other investigators.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.identity = self.identity.with_channel(channel);
        self
    }

    /// Investigator name; recorded as `assigned_to` on its tasks.
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Channel the investigator writes through.
    pub fn channel(&self) -> &Channel {
        self.identity.channel()
    }
}

impl Runnable<InvestigationTask> for Worker {
    type Output = InvestigationTask;

    fn identity(&self) -> &RoleIdentity {
        &self.identity
    }

    fn execute(&mut self, mut task: InvestigationTask) -> Result<InvestigationTask> {
        task.validate(self.identity.name())?;
        let role = &self.identity;

        role.info(format!(
            "[Investigator] Starting task {} at {}",
            task.task_id,
            Local::now().to_rfc3339()
        ));
        task.status = TaskStatus::Running;

        match self.investigator.investigate(&task, role) {
            Ok(result) => {
                task.complete(result);
                role.info(format!("[Investigator] Task {} succeeded", task.task_id));
            }
            Err(e) => {
                role.warning(format!("[Investigator] Task {} failed: {e}", task.task_id));
                task.fail(e.reason);
            }
        }
        Ok(task)
    }
}
