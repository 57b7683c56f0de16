//! MySQL row source

use async_trait::async_trait;
use pdlog_config::{DatabaseConfig, ENV_DB_NAME};
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};

use crate::source::{RecordVisitor, RowSource, stream_records};
use crate::{Result, StorageError};

/// A single MySQL connection, held until [`RowSource::close`]
pub struct MySqlSource {
    conn: Option<MySqlConnection>,
}

impl MySqlSource {
    /// Connect with environment-driven parameters.
    ///
    /// Fails with [`StorageError::MissingSetting`] when no database name is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = connect_options(config)?;

        tracing::debug!(host = %config.host, user = %config.username, "connecting to MySQL");
        let conn = MySqlConnection::connect_with(&options).await?;

        Ok(Self { conn: Some(conn) })
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions> {
    let database = config
        .name
        .as_deref()
        .ok_or(StorageError::MissingSetting(ENV_DB_NAME))?;

    Ok(MySqlConnectOptions::new()
        .host(&config.host)
        .username(&config.username)
        .password(&config.password)
        .database(database))
}

#[async_trait(?Send)]
impl RowSource for MySqlSource {
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
            tracing::debug!("closed MySQL connection");
        }
        Ok(())
    }
}
