use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Global Config (config.toml)
// ============================================================================

/// Configuration for pdlog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    #[serde(default = "default_token")]
    pub token: String,

    #[serde(default = "default_separator")]
    pub separator: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "default_logger_name")]
    pub name: String,

    /// Severity threshold: error, warn, info, debug or trace
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub stream: LogStream,
}

/// Stream the logger writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    #[default]
    Stderr,
    Stdout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_query")]
    pub query: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            token: default_token(),
            separator: default_separator(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: default_logger_name(),
            level: default_level(),
            template: default_template(),
            stream: LogStream::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
        }
    }
}

fn default_fields() -> Vec<String> {
    vec!["password".to_string(), "date_of_birth".to_string()]
}

fn default_token() -> String {
    "***".to_string()
}

fn default_separator() -> char {
    ';'
}

fn default_logger_name() -> String {
    "user_data".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_template() -> String {
    "[HOLBERTON] {name} {level} {asctime}: {message}".to_string()
}

fn default_query() -> String {
    "SELECT * FROM users;".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there first if it's missing
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "pdlog", "pdlog") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.pdlog/config.toml")
        }
    }
}

// ============================================================================
// Database connection (environment)
// ============================================================================

pub const ENV_DB_USERNAME: &str = "PERSONAL_DATA_DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "PERSONAL_DATA_DB_PASSWORD";
pub const ENV_DB_HOST: &str = "PERSONAL_DATA_DB_HOST";
pub const ENV_DB_NAME: &str = "PERSONAL_DATA_DB_NAME";

/// Connection parameters for the personal data database
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    /// No default; a missing name is reported when connecting
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            username: lookup(ENV_DB_USERNAME).unwrap_or_else(|| "root".to_string()),
            password: lookup(ENV_DB_PASSWORD).unwrap_or_default(),
            host: lookup(ENV_DB_HOST).unwrap_or_else(|| "localhost".to_string()),
            name: lookup(ENV_DB_NAME),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.redaction.fields, vec!["password", "date_of_birth"]);
        assert_eq!(config.redaction.token, "***");
        assert_eq!(config.redaction.separator, ';');
        assert_eq!(config.logger.name, "user_data");
        assert_eq!(config.logger.level, "info");
        assert_eq!(config.logger.stream, LogStream::Stderr);
        assert_eq!(config.source.query, "SELECT * FROM users;");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.redaction.fields, config.redaction.fields);
        assert_eq!(parsed.redaction.separator, config.redaction.separator);
        assert_eq!(parsed.logger.template, config.logger.template);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[redaction]
fields = ["ssn", "password"]
separator = "|"

[logger]
stream = "stdout"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.redaction.fields, vec!["ssn", "password"]);
        assert_eq!(config.redaction.separator, '|');
        assert_eq!(config.redaction.token, "***");
        assert_eq!(config.logger.stream, LogStream::Stdout);
        assert_eq!(config.logger.name, "user_data");
        assert_eq!(config.source.query, "SELECT * FROM users;");
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.redaction.fields, created.redaction.fields);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_database_defaults() {
        let db = DatabaseConfig::from_lookup(|_| None);
        assert_eq!(db.username, "root");
        assert_eq!(db.password, "");
        assert_eq!(db.host, "localhost");
        assert_eq!(db.name, None);
    }

    #[test]
    fn test_database_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_USERNAME, "app"),
            (ENV_DB_PASSWORD, "s3cret"),
            (ENV_DB_HOST, "db.internal"),
            (ENV_DB_NAME, "my_db"),
        ]);
        let db = DatabaseConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(db.username, "app");
        assert_eq!(db.password, "s3cret");
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.name.as_deref(), Some("my_db"));
    }

    #[test]
    fn test_database_debug_hides_password() {
        let db = DatabaseConfig::from_lookup(|key| {
            (key == ENV_DB_PASSWORD).then(|| "s3cret".to_string())
        });
        let debug = format!("{:?}", db);
        assert!(!debug.contains("s3cret"));
    }
}
