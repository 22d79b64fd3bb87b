//! Engine log forwarding.
//!
//! Engine-side log events go through [`LogForwarder`] into `tracing`; the
//! host decides on a subscriber.

use config::settings::LogLevel;

/// Forwards engine log events at or above a minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogForwarder {
    min_level: LogLevel,
}

impl LogForwarder {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Returns true if an event at `level` would be forwarded.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn emit(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Trace => tracing::trace!(target: "procgen::engine", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "procgen::engine", "{message}"),
            LogLevel::Info => tracing::info!(target: "procgen::engine", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "procgen::engine", "{message}"),
            LogLevel::Error | LogLevel::Fatal => {
                let fatal = level == LogLevel::Fatal;
                tracing::error!(target: "procgen::engine", fatal, "{message}")
            }
        }
    }
}
