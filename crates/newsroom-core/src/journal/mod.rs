//! Journals: named log channels, the sinks they write to, and scoped
//! redirection of many channels into one per-lead file.
//!
//! - [`sink`]: `LogSink`, `FileSink`, `MemorySink`, `NullSink`, `TracingSink`
//! - [`channel`]: `Channel`, `ChannelSnapshot`
//! - [`redirect`]: `Redirection`

pub mod channel;
pub mod redirect;
pub mod sink;

pub use channel::{Channel, ChannelSnapshot};
pub use redirect::Redirection;
pub use sink::{FileSink, LogLevel, LogRecord, LogSink, MemorySink, NullSink, TracingSink};
