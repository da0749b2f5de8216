//! Tracing initialisation for newsroom binaries.
//!
//! Lead journals are separate files; this subscriber only carries the
//! console side: `lead.*` events from [`crate::obs`], propagated channel
//! records and the console fallback of standalone roles.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter override read before `RUST_LOG`.
pub const LOG_ENV: &str = "NEWSROOM_LOG";

/// Crates whose events follow the requested level. Everything else is held
/// at `warn`.
const NEWSROOM_TARGETS: [&str; 2] = ["newsroom_core", "newsroom"];

/// `warn,newsroom_core=<level>,newsroom=<level>`
pub fn default_directives(level: Level) -> String {
    let mut directives = String::from("warn");
    for target in NEWSROOM_TARGETS {
        directives.push_str(&format!(",{target}={}", level.as_str().to_lowercase()));
    }
    directives
}

/// `NEWSROOM_LOG`, then `RUST_LOG`, then [`default_directives`].
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Install the global subscriber on stderr, leaving stdout to command output.
///
/// `json` switches to newline-delimited JSON with the current lead span
/// attached to every event. Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = env_filter(level);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
