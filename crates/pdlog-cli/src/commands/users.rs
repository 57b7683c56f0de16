use std::path::PathBuf;

use anyhow::{Context, Result};
use pdlog_config::{Config, DatabaseConfig, LogStream};
use pdlog_engine::Reporter;
use pdlog_logging::{Level, Logger, RedactingFormatter};
use pdlog_storage::{MySqlSource, SqliteSource};

pub async fn handle(config: &Config, sqlite: Option<PathBuf>) -> Result<()> {
    let logger = build_logger(config)?;
    let reporter = Reporter::new(&logger);
    let query = config.source.query.as_str();

    let summary = match sqlite {
        Some(path) => {
            let mut source = SqliteSource::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            reporter.report(&mut source, query).await?
        }
        None => {
            let db = DatabaseConfig::from_env();
            let mut source = MySqlSource::connect(&db)
                .await
                .with_context(|| format!("Failed to connect to {}", db.host))?;
            reporter.report(&mut source, query).await?
        }
    };

    tracing::debug!(rows = summary.rows, "users logged");
    Ok(())
}

/// The user data logger described by `config`
pub fn build_logger(config: &Config) -> Result<Logger> {
    let level: Level = config
        .logger
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.logger.level))?;

    let formatter = RedactingFormatter::with_options(
        &config.redaction.fields,
        &config.redaction.token,
        config.redaction.separator,
        &config.logger.template,
    )?;

    let builder = Logger::builder(config.logger.name.as_str())
        .level(level)
        .formatter(formatter);

    let logger = match config.logger.stream {
        LogStream::Stderr => builder.build()?,
        LogStream::Stdout => builder.build_with_writer(std::io::stdout)?,
    };

    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_logger() {
        let logger = build_logger(&Config::default()).unwrap();
        assert_eq!(logger.name(), "user_data");
        assert_eq!(logger.level(), Level::INFO);
    }

    #[test]
    fn test_invalid_level() {
        let mut config = Config::default();
        config.logger.level = "loud".to_string();
        assert!(build_logger(&config).is_err());
    }

    #[test]
    fn test_invalid_template() {
        let mut config = Config::default();
        config.logger.template = "{when}: {message}".to_string();
        assert!(build_logger(&config).is_err());
    }

    #[tokio::test]
    async fn test_missing_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = handle(&Config::default(), Some(dir.path().join("absent.db"))).await;
        assert!(result.is_err());
    }
}
