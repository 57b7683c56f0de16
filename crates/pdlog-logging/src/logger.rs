//! Logger assembly
//!
//! A [`Logger`] owns its own `tracing` dispatcher. Events are sent only to
//! that dispatcher, never to the process-wide default, so each line is
//! emitted exactly once by the logger's single sink. Build it once at
//! startup and pass it by reference.

use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::MakeWriter;

use crate::{RedactingFormatter, Result};

pub const USER_DATA_LOGGER: &str = "user_data";

/// Fields masked by [`Logger::user_data`]
pub const SENSITIVE_FIELDS: [&str; 2] = ["password", "date_of_birth"];

pub struct Logger {
    name: String,
    level: Level,
    dispatch: Dispatch,
}

impl Logger {
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// The stock `user_data` logger: INFO, stderr, masks [`SENSITIVE_FIELDS`]
    pub fn user_data() -> Result<Self> {
        LoggerBuilder::new(USER_DATA_LOGGER)
            .formatter(RedactingFormatter::new(&SENSITIVE_FIELDS)?)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn log(&self, level: Level, message: &str) {
        let logger = self.name.as_str();
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Level::ERROR => tracing::error!(logger, "{message}"),
            Level::WARN => tracing::warn!(logger, "{message}"),
            Level::INFO => tracing::info!(logger, "{message}"),
            Level::DEBUG => tracing::debug!(logger, "{message}"),
            _ => tracing::trace!(logger, "{message}"),
        });
    }

    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish()
    }
}

pub struct LoggerBuilder {
    name: String,
    level: Level,
    formatter: Option<RedactingFormatter>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::INFO,
            formatter: None,
        }
    }

    /// Minimum severity that reaches the sink (default INFO)
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn formatter(mut self, formatter: RedactingFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Build with a stderr stream sink
    pub fn build(self) -> Result<Logger> {
        self.build_with_writer(std::io::stderr)
    }

    pub fn build_with_writer<W>(self, writer: W) -> Result<Logger>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let formatter = match self.formatter {
            Some(formatter) => formatter,
            None => RedactingFormatter::new(&SENSITIVE_FIELDS)?,
        };

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_writer(writer)
            .event_format(formatter)
            .finish();

        Ok(Logger {
            name: self.name,
            level: self.level,
            dispatch: Dispatch::new(subscriber),
        })
    }
}
