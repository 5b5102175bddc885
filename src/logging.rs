//! logging
//!
//! Diagnostic logging initialization using `tracing` and `tracing-subscriber`.
//!
//! Diagnostics go to stderr so they never mix with the progress lines on
//! stdout. `RUST_LOG` takes precedence; otherwise `--debug` selects the
//! `debug` level and everything else `warn`.

use tracing_subscriber::{fmt, util::SubscriberInitExt, EnvFilter};

use crate::ui::output::Verbosity;

/// Initialize the global tracing subscriber. Safe to call multiple times;
/// subsequent calls are no-ops.
pub fn init(verbosity: Verbosity) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Debug => "debug",
        Verbosity::Normal | Verbosity::Quiet => "warn",
    }
}
