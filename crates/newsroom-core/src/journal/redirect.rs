//! Scoped redirection of several channels into one shared sink.

use std::sync::Arc;

use crate::journal::channel::{Channel, ChannelSnapshot};
use crate::journal::sink::LogSink;

/// Guard returned by [`Redirection::install`].
///
/// While alive, every captured channel writes only to the shared sink with
/// propagation disabled. Dropping the guard (or calling [`Redirection::restore`])
/// puts back each channel's exact prior sinks and propagation flag, on every
/// exit path including unwinding.
///
/// Redirection state is a single snapshot per channel, not a stack: nesting
/// two redirections over the same channels restores correctly only if the
/// inner guard is dropped first.
#[must_use = "dropping the guard immediately restores the channels"]
pub struct Redirection {
    sink: Arc<dyn LogSink>,
    saved: Vec<(Channel, ChannelSnapshot)>,
}

impl Redirection {
    /// Redirect `channels` to `sink`.
    ///
    /// Channels are deduplicated by identity, so a channel reachable from
    /// several roles is captured and restored exactly once.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sink: Arc<dyn LogSink> = Arc::new(FileSink::open("journals/lead-1.log")?);
    /// {
    ///     let _redirect = Redirection::install(room.participant_channels(), sink.clone());
    ///     // every participant now writes only to lead-1.log
    /// }
    /// // each channel is back to its own sinks here
    /// sink.close()?;
    /// ```
    pub fn install<'a>(
        channels: impl IntoIterator<Item = &'a Channel>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        let mut saved: Vec<(Channel, ChannelSnapshot)> = Vec::new();
        for channel in channels {
            if saved.iter().any(|(c, _)| c.same_channel(channel)) {
                continue;
            }
            let snapshot = channel.redirect_to(Arc::clone(&sink));
            saved.push((channel.clone(), snapshot));
        }
        tracing::debug!(channels = saved.len(), "journal redirection installed");
        Self { sink, saved }
    }

    /// Number of distinct channels captured.
    pub fn channel_count(&self) -> usize {
        self.saved.len()
    }

    /// Shared sink every captured channel currently writes to.
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Restore all channels now.
    pub fn restore(mut self) {
        self.restore_all();
    }

    fn restore_all(&mut self) {
        let restored = self.saved.len();
        while let Some((channel, snapshot)) = self.saved.pop() {
            channel.restore(snapshot);
        }
        if restored > 0 {
            tracing::debug!(channels = restored, "journal redirection restored");
        }
    }
}

impl Drop for Redirection {
    fn drop(&mut self) {
        self.restore_all();
    }
}
