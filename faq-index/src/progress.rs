//! Lightweight progress reporting for index builds.
//!
//! Use `NoopProgress` for servers and `IndicatifProgress` for the CLI.

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal progress interface used by the build pipeline.
pub trait Progress: Send + Sync {
    /// Set known total units (optional).
    fn set_total(&self, _n: u64) {}
    /// Advance by `n` units and show a short message.
    fn advance(&self, _n: u64, _msg: &str) {}
    /// Finish the UI.
    fn finish(&self, _msg: &str) {}
}

/// No-op reporter for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif-based bar for TTY use.
pub struct IndicatifProgress {
    pb: ProgressBar,
}

impl IndicatifProgress {
    /// Bounded bar; the length is set later through [`Progress::set_total`].
    pub fn bar() -> Self {
        let pb = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Self { pb }
    }
}

impl Progress for IndicatifProgress {
    fn set_total(&self, n: u64) {
        self.pb.set_length(n);
    }
    fn advance(&self, n: u64, msg: &str) {
        self.pb.inc(n);
        self.pb.set_message(msg.to_string());
    }
    fn finish(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}
