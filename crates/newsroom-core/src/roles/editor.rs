//! Editors: roles that decompose a lead into tasks and hand each one to an
//! investigator.

use std::collections::HashSet;

use chrono::Local;

use crate::domain::error::{NewsroomError, PlanningError, Result};
use crate::domain::{InvestigationTask, Lead};
use crate::journal::Channel;
use crate::roles::role::{RoleIdentity, Runnable};
use crate::roles::worker::Worker;

/// Decomposition policy: turns a lead into an ordered task list.
///
/// `editor` is the identity of the editor asking for the plan; log through it
/// so the lines land on the editor's channel under the editor's name.
pub trait Decompose: Send {
    fn generate_plan(
        &self,
        lead: &Lead,
        editor: &RoleIdentity,
    ) -> std::result::Result<Vec<InvestigationTask>, PlanningError>;
}

impl<F> Decompose for F
where
    F: Fn(&Lead, &RoleIdentity) -> std::result::Result<Vec<InvestigationTask>, PlanningError>
        + Send,
{
    fn generate_plan(
        &self,
        lead: &Lead,
        editor: &RoleIdentity,
    ) -> std::result::Result<Vec<InvestigationTask>, PlanningError> {
        self(lead, editor)
    }
}

/// Assignment policy: picks the roster index of the investigator for a task.
pub trait AssignTasks: Send {
    fn assign(
        &mut self,
        task: &InvestigationTask,
        roster: &[Worker],
        editor: &RoleIdentity,
    ) -> Result<usize>;
}

/// Cycles through the roster, advancing once per task whatever its outcome.
///
/// The counter lives in the policy, so it carries over from one lead to the
/// next.
#[derive(Debug, Default, Clone)]
pub struct RoundRobin {
    next: usize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssignTasks for RoundRobin {
    fn assign(
        &mut self,
        task: &InvestigationTask,
        roster: &[Worker],
        editor: &RoleIdentity,
    ) -> Result<usize> {
        if roster.is_empty() {
            editor.error("No investigators available to assign task.");
            return Err(NewsroomError::NoInvestigators {
                editor: editor.name().to_string(),
                task_id: task.task_id.clone(),
            });
        }
        let index = self.next % roster.len();
        self.next += 1;
        Ok(index)
    }
}

/// Plans a lead, assigns every task and collects the results in plan order.
///
/// # Example
///
/// ```ignore
/// let roster = vec![
///     Worker::new(EchoInvestigator).with_name("InvestigatorOne"),
///     Worker::new(AlternateInvestigator).with_name("InvestigatorTwo"),
/// ];
/// let mut editor = Editor::new(FixedPlan, RoundRobin::new(), roster);
/// let tasks = editor.run(&Lead::new(LeadType::Question, "What happened?"))?;
/// assert_eq!(tasks[1].assigned_to, "InvestigatorTwo");
/// ```
pub struct Editor {
    identity: RoleIdentity,
    planner: Box<dyn Decompose>,
    policy: Box<dyn AssignTasks>,
    roster: Vec<Worker>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("identity", &self.identity)
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Default name of an editor.
    pub const KIND: &'static str = "Editor";

    /// An editor named [`Editor::KIND`] over `roster`, in roster order.
    pub fn new(
        planner: impl Decompose + 'static,
        policy: impl AssignTasks + 'static,
        roster: Vec<Worker>,
    ) -> Self {
        Self {
            identity: RoleIdentity::new(Self::KIND, None),
            planner: Box::new(planner),
            policy: Box::new(policy),
            roster,
        }
    }

    /// Rename the editor. See [`RoleIdentity::renamed`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.identity = self.identity.renamed(name);
        self
    }

    pub fn with_journal_dir(mut self, journal_dir: Option<std::path::PathBuf>) -> Self {
        self.identity = self.identity.with_journal_dir(journal_dir);
        self
    }

    /// Log through an existing channel instead of a private one.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.identity = self.identity.with_channel(channel);
        self
    }

    /// Editor name, as it appears in assignment lines and errors.
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Channel the editor writes through.
    pub fn channel(&self) -> &Channel {
        self.identity.channel()
    }

    /// Investigators in assignment order.
    pub fn roster(&self) -> &[Worker] {
        &self.roster
    }

    /// Run the decomposition policy and check task ids are unique.
    ///
    /// A policy failure becomes [`NewsroomError::Planning`] for this lead.
    pub fn generate_plan(&self, lead: &Lead) -> Result<Vec<InvestigationTask>> {
        let tasks = self
            .planner
            .generate_plan(lead, &self.identity)
            .map_err(|e| {
                self.identity
                    .error(format!("Planning failed for lead {}: {e}", lead.lead_id));
                NewsroomError::Planning {
                    lead_id: lead.lead_id.clone(),
                    reason: e.reason,
                }
            })?;
        let mut seen = HashSet::new();
        for task in &tasks {
            task.validate(self.name())?;
            if !seen.insert(task.task_id.as_str()) {
                return Err(NewsroomError::DuplicateTask {
                    lead_id: lead.lead_id.clone(),
                    task_id: task.task_id.clone(),
                });
            }
        }
        Ok(tasks)
    }

    /// Choose the investigator for `task` and record the assignment on it.
    pub fn get_investigator_for_task(&mut self, task: &mut InvestigationTask) -> Result<&mut Worker> {
        let index = self.policy.assign(task, &self.roster, &self.identity)?;
        let editor = &self.identity;
        let worker = self.roster.get_mut(index).ok_or_else(|| {
            NewsroomError::contract(
                editor.name(),
                format!("assignment picked investigator #{index} outside the roster"),
            )
        })?;
        task.assigned_to = worker.name().to_string();
        editor.info(format!(
            "Editor {} assigned task {} to investigator {}",
            editor.name(),
            task.task_id,
            task.assigned_to
        ));
        Ok(worker)
    }

    /// Hand `task` to `worker`. Investigation failures come back as a
    /// `failed` task, not as an error.
    pub fn solve_task(task: InvestigationTask, worker: &mut Worker) -> Result<InvestigationTask> {
        worker.run(task)
    }
}

impl<'a> Runnable<&'a Lead> for Editor {
    type Output = Vec<InvestigationTask>;

    fn identity(&self) -> &RoleIdentity {
        &self.identity
    }

    fn execute(&mut self, lead: &'a Lead) -> Result<Vec<InvestigationTask>> {
        lead.validate(self.name())?;
        self.identity.info(format!(
            "[Editor] Starting lead {} at {}",
            lead.lead_id,
            Local::now().to_rfc3339()
        ));

        let tasks = self.generate_plan(lead)?;
        let mut solved = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            let worker = self.get_investigator_for_task(&mut task)?;
            solved.push(Self::solve_task(task, worker)?);
        }

        self.identity.info(format!(
            "[Editor] Completed lead {} with {} tasks",
            lead.lead_id,
            solved.len()
        ));
        Ok(solved)
    }
}
