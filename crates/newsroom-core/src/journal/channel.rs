//! Named log channels owned by roles.
//!
//! A channel is an explicit handle, not a registry entry: two roles only share
//! a channel when one is constructed with a clone of the other's.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;

use crate::domain::error::{NewsroomError, Result};
use crate::journal::sink::{
    forward_to_tracing, FileSink, LogLevel, LogRecord, LogSink, NullSink, TracingSink,
};

struct ChannelState {
    sinks: Vec<Arc<dyn LogSink>>,
    propagate: bool,
    level: LogLevel,
}

struct ChannelInner {
    name: String,
    state: Mutex<ChannelState>,
}

/// A named log channel with its own sink list and propagation flag.
///
/// When `propagate` is set, records are also handed to the global `tracing`
/// subscriber.
#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Channel")
            .field("name", &self.inner.name)
            .field("sinks", &state.sinks.len())
            .field("propagate", &state.propagate)
            .field("level", &state.level)
            .finish()
    }
}

/// Captured sink list and propagation flag of one channel.
#[derive(Debug, Clone)]
pub struct ChannelSnapshot {
    pub sinks: Vec<Arc<dyn LogSink>>,
    pub propagate: bool,
}

impl PartialEq for ChannelSnapshot {
    /// Sinks compare by identity.
    fn eq(&self, other: &Self) -> bool {
        self.propagate == other.propagate
            && self.sinks.len() == other.sinks.len()
            && self
                .sinks
                .iter()
                .zip(&other.sinks)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl Channel {
    /// A quiet channel: one `NullSink`, no propagation, INFO and above.
    pub fn new(name: impl Into<String>) -> Self {
        let null: Arc<dyn LogSink> = Arc::new(NullSink);
        Self::with_state(name, vec![null], false)
    }

    /// A channel that only forwards to the global `tracing` subscriber.
    pub fn propagating(name: impl Into<String>) -> Self {
        Self::with_state(name, Vec::new(), true)
    }

    fn with_state(name: impl Into<String>, sinks: Vec<Arc<dyn LogSink>>, propagate: bool) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                name: name.into(),
                state: Mutex::new(ChannelState {
                    sinks,
                    propagate,
                    level: LogLevel::Info,
                }),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ChannelState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Name given at construction. Clones report the same name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// True when both handles refer to the same channel.
    pub fn same_channel(&self, other: &Channel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Minimum level a record needs to reach the sinks.
    pub fn level(&self) -> LogLevel {
        self.state().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.state().level = level;
    }

    /// Whether records are also forwarded to the global `tracing` subscriber.
    pub fn propagate(&self) -> bool {
        self.state().propagate
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.state().propagate = propagate;
    }

    /// Attach another sink. Every clone of this handle sees it.
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) {
        self.state().sinks.push(sink);
    }

    /// Detach `sink` (by identity). Returns whether it was attached.
    pub fn remove_sink(&self, sink: &Arc<dyn LogSink>) -> bool {
        let mut state = self.state();
        let before = state.sinks.len();
        state.sinks.retain(|s| !Arc::ptr_eq(s, sink));
        state.sinks.len() != before
    }

    /// Number of sinks currently attached.
    pub fn sink_count(&self) -> usize {
        self.state().sinks.len()
    }

    /// Capture the current sink list and propagation flag.
    pub fn snapshot(&self) -> ChannelSnapshot {
        let state = self.state();
        ChannelSnapshot {
            sinks: state.sinks.clone(),
            propagate: state.propagate,
        }
    }

    /// Under one lock: capture the current state, replace every sink with
    /// `sink` and stop propagation.
    pub(crate) fn redirect_to(&self, sink: Arc<dyn LogSink>) -> ChannelSnapshot {
        let mut state = self.state();
        let snapshot = ChannelSnapshot {
            sinks: std::mem::replace(&mut state.sinks, vec![sink]),
            propagate: state.propagate,
        };
        state.propagate = false;
        snapshot
    }

    /// Put back exactly the captured sinks and propagation flag.
    pub(crate) fn restore(&self, snapshot: ChannelSnapshot) {
        let mut state = self.state();
        state.sinks = snapshot.sinks;
        state.propagate = snapshot.propagate;
    }

    /// Configure the channel for use outside a newsroom.
    ///
    /// With a directory, all sinks are replaced by an append-mode file named
    /// `<name>_<YYYY-MM-DD>.log`. Without one, sinks are replaced by the
    /// console fallback. Returns the journal path when a file was opened.
    pub fn open_standalone_journal(&self, journal_dir: Option<&Path>) -> Result<Option<PathBuf>> {
        let (sink, path) = match journal_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| NewsroomError::journal(dir, e))?;
                let path = dir.join(format!(
                    "{}_{}.log",
                    self.name(),
                    Local::now().format("%Y-%m-%d")
                ));
                let sink: Arc<dyn LogSink> = Arc::new(
                    FileSink::open(&path).map_err(|e| NewsroomError::journal(&path, e))?,
                );
                (sink, Some(path))
            }
            None => {
                let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
                (sink, None)
            }
        };

        let mut state = self.state();
        state.sinks = vec![sink];
        state.propagate = false;
        Ok(path)
    }

    /// Emit a record tagged with this channel's own name.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_as(self.name(), level, message);
    }

    /// Emit a record tagged with `origin` instead of the channel name.
    ///
    /// Roles sharing one channel log through this so every line still names
    /// the role that wrote it. A sink that fails to write is reported through
    /// `tracing` and skipped; the remaining sinks still receive the record.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pool = Channel::new("Pool");
    /// pool.add_sink(Arc::new(MemorySink::new()));
    /// pool.log_as("InvestigatorOne", LogLevel::Info, "checking the docks");
    /// // "... - InvestigatorOne - INFO - checking the docks"
    /// ```
    pub fn log_as(&self, origin: &str, level: LogLevel, message: impl AsRef<str>) {
        let (sinks, propagate) = {
            let state = self.state();
            if level < state.level {
                return;
            }
            (state.sinks.clone(), state.propagate)
        };

        let record = LogRecord {
            timestamp: Local::now(),
            channel: origin,
            level,
            message: message.as_ref(),
        };
        for sink in &sinks {
            if let Err(e) = sink.write_record(&record) {
                tracing::warn!(
                    channel = %self.name(),
                    origin,
                    error = %e,
                    "journal sink write failed"
                );
            }
        }
        if propagate {
            forward_to_tracing(&record);
        }
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
