//! Role identity and the shared run lifecycle.

use std::path::{Path, PathBuf};

use crate::domain::error::Result;
use crate::journal::{Channel, LogLevel};

/// Name, journal directory and log channel of a role instance.
///
/// The name tags every line the role writes, even when the channel is shared
/// with other roles through [`RoleIdentity::with_channel`].
#[derive(Debug, Clone)]
pub struct RoleIdentity {
    name: String,
    journal_dir: Option<PathBuf>,
    channel: Channel,
    shared_channel: bool,
}

impl RoleIdentity {
    /// Identity with its own quiet channel named after the role.
    pub fn new(name: impl Into<String>, journal_dir: Option<PathBuf>) -> Self {
        let name = name.into();
        Self {
            channel: Channel::new(name.clone()),
            name,
            journal_dir,
            shared_channel: false,
        }
    }

    /// Rename the role.
    ///
    /// A private channel is replaced with a fresh one of the new name. A
    /// channel injected through [`RoleIdentity::with_channel`] is kept.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        if self.shared_channel {
            return Self {
                name: name.into(),
                ..self
            };
        }
        Self::new(name, self.journal_dir)
    }

    /// Replace the journal directory used for standalone runs and lead
    /// journals.
    pub fn with_journal_dir(mut self, journal_dir: Option<PathBuf>) -> Self {
        self.journal_dir = journal_dir;
        self
    }

    /// Write through an existing channel instead of a private one. Records
    /// stay tagged with this role's name.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pool = Channel::new("Pool");
    /// let a = RoleIdentity::new("A", None).with_channel(pool.clone());
    /// let b = RoleIdentity::new("B", None).with_channel(pool.clone());
    /// a.info("hello"); // "... - A - INFO - hello" on every sink of `pool`
    /// ```
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self.shared_channel = true;
        self
    }

    /// Role name, used as the tag on every line the role writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory for journals, if journaling is enabled.
    pub fn journal_dir(&self) -> Option<&Path> {
        self.journal_dir.as_deref()
    }

    /// Channel the role writes through.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Point the channel at `<journal_dir>/<channel>_<date>.log`, or at the
    /// console when no directory is configured.
    pub fn open_standalone_journal(&self) -> Result<Option<PathBuf>> {
        self.channel.open_standalone_journal(self.journal_dir())
    }

    /// Write one record tagged with the role name.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.channel.log_as(&self.name, level, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }
}

/// Template lifecycle shared by every role.
///
/// Implementors supply [`Runnable::execute`]; callers only ever use
/// [`Runnable::run`], which brackets the call with start and finish records on
/// the role's channel. Errors from `execute` propagate unchanged and skip the
/// finish record.
///
/// # Example
///
/// ```ignore
/// let mut worker = Worker::new(EchoInvestigator).with_name("InvestigatorOne");
/// let task = worker.run(InvestigationTask::new("t1", "check", "the docks"))?;
/// assert_eq!(task.status, TaskStatus::Done);
/// ```
pub trait Runnable<I> {
    type Output;

    /// Identity whose channel receives the lifecycle markers.
    fn identity(&self) -> &RoleIdentity;

    /// Role-specific work. Called only through [`Runnable::run`].
    fn execute(&mut self, input: I) -> Result<Self::Output>;

    fn run(&mut self, input: I) -> Result<Self::Output> {
        let name = self.identity().name().to_string();
        self.identity().info(format!("Starting execution for {name}."));
        let output = self.execute(input)?;
        self.identity().info(format!("Finished execution for {name}."));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::NewsroomError;
    use crate::journal::MemorySink;
    use std::sync::Arc;

    struct Doubler {
        identity: RoleIdentity,
    }

    impl Runnable<i32> for Doubler {
        type Output = i32;

        fn identity(&self) -> &RoleIdentity {
            &self.identity
        }

        fn execute(&mut self, input: i32) -> Result<i32> {
            if input < 0 {
                return Err(NewsroomError::contract("Doubler", "negative input"));
            }
            self.identity.info(format!("doubling {input}"));
            Ok(input * 2)
        }
    }

    fn doubler() -> (Doubler, Arc<MemorySink>) {
        let identity = RoleIdentity::new("Doubler", None);
        let mem = Arc::new(MemorySink::new());
        identity.channel().add_sink(mem.clone());
        (Doubler { identity }, mem)
    }

    #[test]
    fn test_run_brackets_execute_with_markers() {
        let (mut role, mem) = doubler();
        assert_eq!(role.run(21).unwrap(), 42);

        let lines = mem.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Doubler - INFO - Starting execution for Doubler."));
        assert!(lines[1].ends_with("doubling 21"));
        assert!(lines[2].ends_with("Doubler - INFO - Finished execution for Doubler."));
    }

    #[test]
    fn test_run_propagates_errors_unchanged() {
        let (mut role, mem) = doubler();
        match role.run(-1).unwrap_err() {
            NewsroomError::ContractViolation { role, reason } => {
                assert_eq!(role, "Doubler");
                assert_eq!(reason, "negative input");
            }
            other => panic!("Expected ContractViolation, got {:?}", other),
        }
        assert_eq!(mem.lines().len(), 1);
    }

    #[test]
    fn test_renamed_identity_gets_new_channel() {
        let identity = RoleIdentity::new("Investigator", Some(PathBuf::from("journals")));
        let old = identity.channel().clone();
        let renamed = identity.renamed("InvestigatorOne");
        assert_eq!(renamed.channel().name(), "InvestigatorOne");
        assert!(!renamed.channel().same_channel(&old));
        assert_eq!(renamed.journal_dir(), Some(Path::new("journals")));
    }

    #[test]
    fn test_renamed_identity_keeps_injected_channel() {
        let pool = Channel::new("Pool");
        let identity = RoleIdentity::new("Investigator", None)
            .with_channel(pool.clone())
            .renamed("A");
        assert_eq!(identity.name(), "A");
        assert!(identity.channel().same_channel(&pool));
    }

    #[test]
    fn test_shared_channel_lines_carry_role_name() {
        let pool = Channel::new("Pool");
        let mem = Arc::new(MemorySink::new());
        pool.add_sink(mem.clone());
        let a = RoleIdentity::new("A", None).with_channel(pool.clone());
        let b = RoleIdentity::new("B", None).with_channel(pool);

        a.info("from a");
        b.warning("from b");

        let lines = mem.lines();
        assert!(lines[0].ends_with(" - A - INFO - from a"));
        assert!(lines[1].ends_with(" - B - WARNING - from b"));
    }
}
