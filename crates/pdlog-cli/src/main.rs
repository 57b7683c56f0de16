mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pdlog_config::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Diagnostics only; user data goes through its own logger
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    diagnostics(filter, std::io::stderr).init();

    let cli = cli::Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or_default() {
        cli::Commands::Users { sqlite } => commands::users::handle(&config, sqlite).await,
        cli::Commands::Filter {
            fields,
            redaction,
            separator,
            messages,
        } => commands::filter::handle(&config, fields, redaction, separator, messages),
        cli::Commands::Config => commands::config::handle(&config, &config_path),
    }
}

/// Diagnostics subscriber; kept off stdout, which carries `filter` output
fn diagnostics<W>(
    filter: EnvFilter,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdlog_logging::MemorySink;

    #[test]
    fn test_diagnostics_use_given_writer() {
        let sink = MemorySink::new();
        let subscriber = diagnostics(EnvFilter::new("info"), sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("connected");
            tracing::debug!("hidden");
        });

        let contents = sink.contents();
        assert!(contents.contains("connected"));
        assert!(!contents.contains("hidden"));
    }
}
