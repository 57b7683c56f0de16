//! SQLite row source

use std::path::Path;

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};

use crate::source::{RecordVisitor, RowSource, stream_records};
use crate::{Result, StorageError};

pub struct SqliteSource {
    conn: Option<SqliteConnection>,
}

impl SqliteSource {
    /// Connect with a `sqlite:` URL
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = SqliteConnection::connect(url).await?;
        Ok(Self { conn: Some(conn) })
    }

    /// Open an existing database file read-only
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        tracing::debug!(path = %path.display(), "opening SQLite database");
        let conn = SqliteConnection::connect_with(&options).await?;
        Ok(Self { conn: Some(conn) })
    }
}

#[async_trait(?Send)]
impl RowSource for SqliteSource {
    async fn for_each_record(
        &mut self,
        query: &str,
        visit: &mut RecordVisitor<'_>,
    ) -> Result<usize> {
        let conn = self.conn.as_mut().ok_or(StorageError::Closed)?;
        stream_records(conn, query, visit).await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
        }
        Ok(())
    }
}
