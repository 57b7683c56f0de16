//! Error types for pdlog-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Row source is closed")]
    Closed,
}
