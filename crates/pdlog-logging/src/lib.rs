//! Redacting log pipeline for pdlog
//!
//! This crate provides:
//! - [`LogRecord`] - one log event with message template and arguments
//! - [`RedactingFormatter`] - renders records and masks sensitive fields
//! - [`Logger`] - an explicitly owned logger with a single sink
//! - [`MemorySink`] - in-memory sink for tests

pub mod error;
pub mod formatter;
pub mod logger;
pub mod record;
pub mod sink;
pub mod template;

pub use error::{FormatError, Result};
pub use formatter::RedactingFormatter;
pub use logger::{Logger, LoggerBuilder, SENSITIVE_FIELDS, USER_DATA_LOGGER};
pub use record::LogRecord;
pub use sink::MemorySink;
pub use template::{DEFAULT_TEMPLATE, LogTemplate};

pub use tracing::Level;
