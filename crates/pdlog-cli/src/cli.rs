use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdlog")]
#[command(about = "Log personal data with sensitive fields redacted", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Log every row of the users table with sensitive fields redacted (default)
    Users {
        /// Read from a SQLite file instead of the MySQL database
        #[arg(long)]
        sqlite: Option<PathBuf>,
    },

    /// Redact messages given as arguments, or stdin lines when none are given
    Filter {
        /// Field to redact (repeatable, default from config)
        #[arg(long = "field", short = 'f')]
        fields: Vec<String>,

        /// Replacement token (default from config: ***)
        #[arg(long)]
        redaction: Option<String>,

        /// Pair separator (default from config: ;)
        #[arg(long)]
        separator: Option<char>,

        /// Messages to redact
        messages: Vec<String>,
    },

    /// Show the effective configuration
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Users { sqlite: None }
    }
}
