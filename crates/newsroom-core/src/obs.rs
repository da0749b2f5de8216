//! Structured tracing hooks for the lead lifecycle.
//!
//! These go to the global `tracing` subscriber regardless of where role
//! channels are currently redirected.

use tracing::info;

/// RAII guard that enters a lead-scoped tracing span.
pub struct LeadSpan {
    _span: tracing::span::EnteredSpan,
}

impl LeadSpan {
    pub fn enter(lead_id: &str) -> Self {
        let span = tracing::info_span!("newsroom.lead", lead_id = %lead_id);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_lead_received(lead_id: &str, newsroom: &str) {
    info!(event = "lead.received", lead_id = %lead_id, newsroom = %newsroom);
}

pub fn emit_lead_finished(lead_id: &str, total_tasks: usize, failed_tasks: usize, duration_ms: u64) {
    info!(
        event = "lead.finished",
        lead_id = %lead_id,
        total_tasks = total_tasks,
        failed_tasks = failed_tasks,
        duration_ms = duration_ms,
    );
}

/// Warning: the lead's journal could not be flushed and closed.
pub fn emit_journal_close_error(lead_id: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "journal.close_error", lead_id = %lead_id, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_span_enter() {
        let _span = LeadSpan::enter("lead-1");
        emit_lead_received("lead-1", "Newsroom");
        emit_lead_finished("lead-1", 2, 0, 3);
    }
}
