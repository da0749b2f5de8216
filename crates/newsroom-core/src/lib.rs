//! Newsroom Core Library
//!
//! A newsroom hands each lead to an editor, which splits it into tasks and
//! dispatches them round-robin to investigators. Every role writes to its own
//! named channel; while a lead is processed, all of those channels are
//! redirected into a single `<lead_id>.log` journal and restored afterwards.

pub mod basic_room;
pub mod config;
pub mod domain;
pub mod journal;
pub mod obs;
pub mod roles;
pub mod telemetry;

pub use basic_room::{basic_newsroom, AlternateInvestigator, EchoInvestigator, FixedPlan};
pub use config::RoomConfig;
pub use domain::{
    InvestigationError, InvestigationTask, Lead, LeadStatus, LeadType, NewsroomError,
    PlanningError, Result, TaskStatus,
};
pub use journal::{
    Channel, ChannelSnapshot, FileSink, LogLevel, LogRecord, LogSink, MemorySink, NullSink,
    Redirection, TracingSink,
};
pub use obs::{emit_journal_close_error, emit_lead_finished, emit_lead_received, LeadSpan};
pub use roles::{
    AssignTasks, Decompose, Editor, Investigate, Newsroom, RoleIdentity, RoundRobin, Runnable,
    Worker,
};
pub use telemetry::init_tracing;

/// Newsroom version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
