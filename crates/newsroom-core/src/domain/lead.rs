//! Leads: the unit of work submitted to a newsroom.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{NewsroomError, Result};

/// Kind of material a lead carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadType {
    File,
    Question,
    Email,
}

impl std::fmt::Display for LeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadType::File => "file",
            LeadType::Question => "question",
            LeadType::Email => "email",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for LeadType {
    type Err = NewsroomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(LeadType::File),
            "question" => Ok(LeadType::Question),
            "email" => Ok(LeadType::Email),
            other => Err(NewsroomError::Config(format!("unknown lead type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
}

/// A unit of work to investigate. Read-only once handed to a newsroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub lead_id: String,
    pub lead_type: LeadType,
    pub content: String,
    pub status: LeadStatus,
    pub timestamp: DateTime<Local>,
}

impl Lead {
    /// Create a lead with a fresh UUID v4 id.
    pub fn new(lead_type: LeadType, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), lead_type, content)
    }

    /// Create a lead with a caller-chosen id. See [`Lead::validate`].
    pub fn with_id(lead_id: impl Into<String>, lead_type: LeadType, content: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            lead_type,
            content: content.into(),
            status: LeadStatus::New,
            timestamp: Local::now(),
        }
    }

    /// The lead id names the per-lead journal file, so it must be a usable
    /// file stem.
    pub fn validate(&self, role: &str) -> Result<()> {
        if self.lead_id.trim().is_empty() {
            return Err(NewsroomError::contract(role, "lead id must not be empty"));
        }
        if self.lead_id.contains(['/', '\\']) || self.lead_id == "." || self.lead_id == ".." {
            return Err(NewsroomError::contract(
                role,
                format!("lead id {:?} is not a valid journal name", self.lead_id),
            ));
        }
        Ok(())
    }

    /// Content shortened to `max_chars`, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() > max_chars {
            let head: String = self.content.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.content.clone()
        }
    }
}
