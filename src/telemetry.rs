//! Tracing subscriber setup for the binary.

use std::io::IsTerminal;

use chrono::{SecondsFormat, Utc};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// RFC3339 timestamps in UTC with millisecond precision.
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// `RUST_LOG` if set, otherwise `level` (falling back to `info` when unparsable).
pub fn env_filter_with_level(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_ansi(std::io::stdout().is_terminal());

    tracing_subscriber::registry()
        .with(env_filter_with_level(level))
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
