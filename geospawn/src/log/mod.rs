//! Logging abstraction layer.
//!
//! Components log through the [`Logger`] trait rather than calling `tracing`
//! directly, so tests can silence or capture output and the backend can be
//! swapped without touching lookup code.
//!
//! - [`TracingLogger`]: production adapter that forwards to `tracing`
//! - [`NoOpLogger`]: discards everything
//! - [`MemoryLogger`]: records messages for assertions in tests
//!
//! ```
//! use geospawn::log::{Logger, MemoryLogger, LogLevel};
//! use geospawn::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_warn!(logger, "tile database unavailable: {}", "missing file");
//! assert!(logger.contains(LogLevel::Warn, "unavailable"));
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
