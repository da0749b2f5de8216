//! Log records and the sinks they are written to.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local};

/// Severity of a journal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// One journal event, tagged with the name of the role that emitted it.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Local>,
    /// Origin tag: the emitting role, or the channel name when logged directly.
    pub channel: &'a str,
    pub level: LogLevel,
    pub message: &'a str,
}

impl LogRecord<'_> {
    /// `<timestamp> - <channel> - <LEVEL> - <message>`
    pub fn format_line(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
            self.channel,
            self.level,
            self.message
        )
    }
}

/// Destination for journal records.
///
/// Sinks are shared between channels behind an `Arc`; identity (not
/// equality) is what redirection snapshots compare.
pub trait LogSink: Send + Sync + std::fmt::Debug {
    fn write_record(&self, record: &LogRecord<'_>) -> io::Result<()>;

    /// Release the underlying resource. Further writes fail.
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Appends formatted lines to a file, flushing after every record.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    /// Open `path` in append mode, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    /// File the sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_record(&self, record: &LogRecord<'_>) -> io::Result<()> {
        let mut guard = lock(&self.writer);
        let writer = guard.as_mut().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("journal {:?} is closed", self.path),
            )
        })?;
        writeln!(writer, "{}", record.format_line())?;
        writer.flush()
    }

    fn close(&self) -> io::Result<()> {
        match lock(&self.writer).take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// Keeps formatted lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl LogSink for MemorySink {
    fn write_record(&self, record: &LogRecord<'_>) -> io::Result<()> {
        lock(&self.lines).push(record.format_line());
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write_record(&self, _record: &LogRecord<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Console fallback: hands records to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_record(&self, record: &LogRecord<'_>) -> io::Result<()> {
        forward_to_tracing(record);
        Ok(())
    }
}

pub(crate) fn forward_to_tracing(record: &LogRecord<'_>) {
    match record.level {
        LogLevel::Debug => tracing::debug!(channel = %record.channel, "{}", record.message),
        LogLevel::Info => tracing::info!(channel = %record.channel, "{}", record.message),
        LogLevel::Warning => tracing::warn!(channel = %record.channel, "{}", record.message),
        LogLevel::Error => tracing::error!(channel = %record.channel, "{}", record.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(channel: &'a str, message: &'a str) -> LogRecord<'a> {
        LogRecord {
            timestamp: Local::now(),
            channel,
            level: LogLevel::Info,
            message,
        }
    }

    #[test]
    fn test_format_line_orders_fields() {
        let line = record("Editor", "planning").format_line();
        assert!(line.ends_with(" - Editor - INFO - planning"));
        // "%Y-%m-%d %H:%M:%S,%3f" is 23 characters wide.
        assert_eq!(line.find(" - Editor"), Some(23));
    }

    #[test]
    fn test_file_sink_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lead.log");

        let first = FileSink::open(&path).unwrap();
        first.write_record(&record("A", "one")).unwrap();
        first.close().unwrap();

        let second = FileSink::open(&path).unwrap();
        second.write_record(&record("B", "two")).unwrap();
        second.close().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("A - INFO - one"));
        assert!(lines[1].ends_with("B - INFO - two"));
    }

    #[test]
    fn test_closed_file_sink_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::open(dir.path().join("x.log")).unwrap();
        sink.close().unwrap();
        assert!(sink.write_record(&record("A", "late")).is_err());
        // closing twice is harmless
        assert!(sink.close().is_ok());
    }

    #[test]
    fn test_memory_sink_captures_lines() {
        let sink = MemorySink::new();
        sink.write_record(&record("A", "hello")).unwrap();
        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].contains("A - INFO - hello"));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
    }
}
