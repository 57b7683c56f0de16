//! Error types for pdlog-logging

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Not enough arguments for message: no argument for placeholder {index}")]
    MissingArgument { index: usize },

    #[error("Not all arguments converted: {used} used, {provided} provided")]
    UnusedArguments { used: usize, provided: usize },

    #[error("Unknown template placeholder: {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("Unclosed template placeholder at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Redact(#[from] pdlog_security::RedactError),
}
