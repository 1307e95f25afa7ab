//! Logging and tracing setup for stsift.
//!
//! The library only emits `tracing` events: validator rejections and
//! acceptances at `debug`, rename skips at `info`, batch and reassembly
//! damage at `warn`. Binaries and tests install a subscriber here, once.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Output shape of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event, with the current span attached.
    Json,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Only the first call in a process has
/// any effect, whatever its arguments.
pub fn init(format: LogFormat, default_directive: &str) {
    INIT.call_once(|| {
        let filter = env_filter(default_directive);
        let registry = tracing_subscriber::registry().with(filter);
        let installed = match format {
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_span_events(FmtSpan::CLOSE)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_span_events(FmtSpan::CLOSE)
                        .with_target(true)
                        .with_current_span(true),
                )
                .try_init(),
        };
        // another subscriber may already own the process (test harnesses)
        if installed.is_ok() {
            info!(?format, "stsift tracing initialized");
        }
    });
}

/// Human-readable output, `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    init(LogFormat::Pretty, DEFAULT_DIRECTIVE);
}

/// JSON output for log collectors.
pub fn init_tracing_json() {
    init(LogFormat::Json, DEFAULT_DIRECTIVE);
}
