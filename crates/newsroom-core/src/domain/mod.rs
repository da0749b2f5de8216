//! Domain models for the newsroom.
//!
//! - `Lead`: a unit of work submitted for investigation
//! - `InvestigationTask`: one assignable piece of a lead
//! - `NewsroomError` / `InvestigationError` / `PlanningError`: the error taxonomy

pub mod error;
pub mod lead;
pub mod task;

pub use error::{InvestigationError, NewsroomError, PlanningError, Result};
pub use lead::{Lead, LeadStatus, LeadType};
pub use task::{InvestigationTask, TaskStatus};
