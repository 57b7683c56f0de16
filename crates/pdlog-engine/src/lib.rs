use anyhow::Result;
use pdlog_logging::Logger;
use pdlog_storage::{Record, RowSource};

/// Query run by `pdlog users`
pub const USERS_QUERY: &str = "SELECT * FROM users;";

/// Build `header=value; header=value;` from one row
pub fn assemble_message<H, V>(headers: &[H], values: &[V]) -> String
where
    H: AsRef<str>,
    V: AsRef<str>,
{
    let pairs: Vec<String> = headers
        .iter()
        .zip(values)
        .map(|(header, value)| format!("{}={}", header.as_ref(), value.as_ref()))
        .collect();

    pairs.join("; ") + ";"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows: usize,
}

/// Logs every row of a query through a redacting logger
pub struct Reporter<'a> {
    logger: &'a Logger,
}

impl<'a> Reporter<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }

    /// Emit one INFO line per row of `query`, then close the source.
    ///
    /// The source is closed whether or not iteration succeeded. The first
    /// error aborts the remaining rows.
    pub async fn report<S>(&self, source: &mut S, query: &str) -> Result<ReportSummary>
    where
        S: RowSource + ?Sized,
    {
        let logger = self.logger;
        let fetched = source
            .for_each_record(query, &mut |record: &Record| {
                logger.info(&assemble_message(record.headers(), record.values()));
            })
            .await;
        let closed = source.close().await;

        let rows = fetched?;
        closed?;

        tracing::debug!(rows, logger = logger.name(), "report complete");
        Ok(ReportSummary { rows })
    }
}
