//! Error types for pdlog-security

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedactError>;

#[derive(Error, Debug)]
pub enum RedactError {
    #[error("Invalid redaction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
