//! Fixed two-step plan used by the basic room.

use crate::domain::error::PlanningError;
use crate::domain::{InvestigationTask, Lead};
use crate::roles::{Decompose, RoleIdentity};

const DESCRIPTION_CHARS: usize = 50;

/// Plans the same two tasks for every lead.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPlan;

impl Decompose for FixedPlan {
    fn generate_plan(
        &self,
        lead: &Lead,
        editor: &RoleIdentity,
    ) -> Result<Vec<InvestigationTask>, PlanningError> {
        editor.info(format!(
            "Editor {} generating plan for lead: {}",
            editor.name(),
            lead.lead_id
        ));

        let head: String = lead.content.chars().take(DESCRIPTION_CHARS).collect();
        let tasks = vec![
            InvestigationTask::new(
                format!("{}_task_1", lead.lead_id),
                format!("First dummy task for lead: {head}..."),
                &lead.content,
            ),
            InvestigationTask::new(
                format!("{}_task_2", lead.lead_id),
                format!("Second dummy task for lead: {head}..."),
                &lead.content,
            ),
        ];

        editor.info(format!(
            "Editor {} generated {} tasks for lead: {}",
            editor.name(),
            tasks.len(),
            lead.lead_id
        ));
        Ok(tasks)
    }
}
