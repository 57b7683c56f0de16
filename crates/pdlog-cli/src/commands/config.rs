use std::path::Path;

use anyhow::Result;
use pdlog_config::{Config, DatabaseConfig};

pub fn handle(config: &Config, path: &Path) -> Result<()> {
    println!("Config file: {}", path.display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    println!();
    println!("Database (environment): {:?}", DatabaseConfig::from_env());
    Ok(())
}
