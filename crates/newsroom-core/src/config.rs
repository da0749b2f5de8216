//! Room configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::{NewsroomError, Result};

/// How a basic newsroom is staffed and where it keeps journals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub newsroom_name: String,
    pub editor_name: String,
    /// One investigator per name, in round-robin order.
    pub investigator_names: Vec<String>,
    /// `None` disables per-lead journal files.
    pub journal_dir: Option<PathBuf>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            newsroom_name: "Newsroom".to_string(),
            editor_name: "Editor".to_string(),
            investigator_names: vec!["InvestigatorOne".to_string(), "InvestigatorTwo".to_string()],
            journal_dir: None,
        }
    }
}

impl RoomConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: RoomConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` and parse it with [`RoomConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NewsroomError::Config(format!("read {:?}: {e}", path)))?;
        Self::from_json_str(&raw)
    }

    /// Names become channel and journal file names, so they must be non-empty.
    /// An empty roster is allowed; leads then fail at assignment.
    pub fn validate(&self) -> Result<()> {
        if self.newsroom_name.trim().is_empty() {
            return Err(NewsroomError::Config("newsroom_name must not be empty".to_string()));
        }
        if self.editor_name.trim().is_empty() {
            return Err(NewsroomError::Config("editor_name must not be empty".to_string()));
        }
        if let Some(pos) = self.investigator_names.iter().position(|n| n.trim().is_empty()) {
            return Err(NewsroomError::Config(format!(
                "investigator_names[{pos}] must not be empty"
            )));
        }
        if self.investigator_names.is_empty() {
            tracing::warn!("room configured without investigators; every lead will fail at assignment");
        }
        Ok(())
    }
}
