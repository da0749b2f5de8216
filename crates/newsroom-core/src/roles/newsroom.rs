//! The newsroom: owns an editor and its investigators, and gives every lead a
//! journal of its own.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::error::{NewsroomError, Result};
use crate::domain::{InvestigationTask, Lead, TaskStatus};
use crate::journal::{Channel, FileSink, LogSink, Redirection};
use crate::obs::{emit_journal_close_error, emit_lead_finished, emit_lead_received, LeadSpan};
use crate::roles::editor::Editor;
use crate::roles::role::{RoleIdentity, Runnable};
use crate::roles::worker::Worker;

const PREVIEW_CHARS: usize = 50;

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Top-level coordinator.
///
/// With a journal directory configured, [`Newsroom::run`] sends every record
/// from the newsroom, the editor and all investigators to
/// `<journal_dir>/<lead_id>.log` for the duration of the lead, then restores
/// each channel exactly as it was, whether the lead succeeded or not.
///
/// Channel state is a critical section: one lead at a time per set of roles.
#[derive(Debug)]
pub struct Newsroom {
    identity: RoleIdentity,
    editor: Editor,
}

impl Newsroom {
    /// Default name of a newsroom.
    pub const KIND: &'static str = "Newsroom";

    /// A newsroom named [`Newsroom::KIND`] around `editor` and its roster.
    /// Journaling is off until [`Newsroom::with_journal_dir`] is set.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut room = Newsroom::new(editor).with_journal_dir(Some("journals".into()));
    /// let tasks = room.run(&Lead::new(LeadType::Question, "What happened?"))?;
    /// // every line of the lead is in journals/<lead_id>.log
    /// ```
    pub fn new(editor: Editor) -> Self {
        Self {
            identity: RoleIdentity::new(Self::KIND, None),
            editor,
        }
    }

    /// Rename the newsroom. See [`RoleIdentity::renamed`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.identity = self.identity.renamed(name);
        self
    }

    /// Directory for per-lead journals. `None` keeps every record on the
    /// roles' own channels.
    pub fn with_journal_dir(mut self, journal_dir: Option<PathBuf>) -> Self {
        self.identity = self.identity.with_journal_dir(journal_dir);
        self
    }

    /// Newsroom name, as it appears in the lead journal.
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn identity(&self) -> &RoleIdentity {
        &self.identity
    }

    /// Channel the newsroom itself writes through.
    pub fn channel(&self) -> &Channel {
        self.identity.channel()
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The editor's roster, in assignment order.
    pub fn investigators(&self) -> &[Worker] {
        self.editor.roster()
    }

    /// Where the journal for `lead` goes, if journaling is enabled.
    pub fn journal_path(&self, lead: &Lead) -> Option<PathBuf> {
        self.identity
            .journal_dir()
            .map(|dir| dir.join(format!("{}.log", lead.lead_id)))
    }

    /// Channels of every participant: newsroom, editor, each investigator.
    /// May contain the same channel more than once.
    pub fn participant_channels(&self) -> Vec<&Channel> {
        let mut channels = vec![self.channel(), self.editor.channel()];
        channels.extend(self.investigators().iter().map(Worker::channel));
        channels
    }

    /// Process one lead and return its tasks in plan order.
    pub fn run(&mut self, lead: &Lead) -> Result<Vec<InvestigationTask>> {
        lead.validate(self.name())?;
        let _span = LeadSpan::enter(&lead.lead_id);
        emit_lead_received(&lead.lead_id, self.name());
        let started = Instant::now();

        let outcome = match self.journal_path(lead) {
            Some(path) => self.run_journaled(lead, path),
            None => {
                self.identity.warning(format!(
                    "No journal_dir configured for newsroom {}. Logs for lead {} will not be saved to a dedicated file.",
                    self.name(),
                    lead.lead_id
                ));
                self.process(lead)
            }
        };

        if let Ok(solved) = &outcome {
            let failed = solved
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count();
            emit_lead_finished(
                &lead.lead_id,
                solved.len(),
                failed,
                elapsed_ms(started.elapsed()),
            );
        }
        outcome
    }

    fn run_journaled(&mut self, lead: &Lead, path: PathBuf) -> Result<Vec<InvestigationTask>> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| NewsroomError::journal(dir, e))?;
        }
        let sink = Arc::new(FileSink::open(&path).map_err(|e| NewsroomError::journal(&path, e))?);

        let outcome = {
            let _redirect = Redirection::install(self.participant_channels(), sink.clone());
            self.process(lead)
        };

        let closed = sink.close();
        let solved = outcome?;
        closed.map_err(|e| {
            emit_journal_close_error(&lead.lead_id, &e);
            NewsroomError::journal(&path, e)
        })?;
        Ok(solved)
    }

    fn process(&mut self, lead: &Lead) -> Result<Vec<InvestigationTask>> {
        self.identity.info(format!(
            "News Room {} received lead: {} - {}",
            self.name(),
            lead.lead_id,
            lead.preview(PREVIEW_CHARS)
        ));

        let solved = self.editor.run(lead)?;

        self.identity.info(format!(
            "News Room {} finished processing lead: {}. Solved tasks: {}",
            self.name(),
            lead.lead_id,
            solved.len()
        ));
        Ok(solved)
    }
}
