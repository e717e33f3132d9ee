//! Capturing logger implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;
use std::sync::{Mutex, PoisonError};

/// One captured log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every message in memory.
///
/// Used by tests to assert that degraded paths (an unreadable tile database,
/// a mapping that names a missing resource) are reported.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if a record at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    /// Number of records captured at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let record = LogRecord {
            level,
            message: args.to_string(),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_debug, log_warn};

    #[test]
    fn test_memory_logger_captures_messages() {
        let logger = MemoryLogger::new();
        log_warn!(logger, "tile query failed: {}", "disk I/O error");
        log_debug!(logger, "cache hit for {}", "dr5re");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].message, "tile query failed: disk I/O error");
        assert!(logger.contains(LogLevel::Debug, "dr5re"));
        assert!(!logger.contains(LogLevel::Warn, "dr5re"));
        assert_eq!(logger.count(LogLevel::Warn), 1);
    }

    #[test]
    fn test_memory_logger_clear() {
        let logger = MemoryLogger::new();
        logger.info(format_args!("one"));
        logger.clear();
        assert!(logger.records().is_empty());
    }
}
