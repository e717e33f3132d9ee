//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger that forwards to the `tracing` crate under the `geospawn` target.
///
/// Output appears once a subscriber is installed, normally through
/// [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "geospawn", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "geospawn", "{}", args),
            LogLevel::Info => tracing::info!(target: "geospawn", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "geospawn", "{}", args),
            LogLevel::Error => tracing::error!(target: "geospawn", "{}", args),
        }
    }
}
