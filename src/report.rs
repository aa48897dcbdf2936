//! Run reporting
//!
//! The orchestrator reports through an injected [`Reporter`] rather than an
//! ambient global sink, so its core logic stays testable without a live
//! logging subscriber.

/// Sink for orchestrator log lines and fractional progress
pub trait Reporter: Send + Sync {
    fn info(&self, msg: &str);

    /// A recoverable, per-item failure
    fn error(&self, msg: &str);

    /// A failure that aborts the whole run
    fn fatal(&self, msg: &str);

    /// Fractional progress in [0, 100]
    fn progress(&self, percent: f64);
}

/// Production reporter backed by `tracing`
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn fatal(&self, msg: &str) {
        tracing::error!(fatal = true, "{msg}");
    }

    fn progress(&self, percent: f64) {
        tracing::info!(percent, "progress");
    }
}
