use time::OffsetDateTime;
use tracing::Level;

use crate::{FormatError, Result};

/// A single log event as seen by the formatter
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub name: String,
    pub level: Level,
    pub created: OffsetDateTime,
    /// Message template; `{}` placeholders take `args` in order
    pub msg: String,
    pub args: Vec<String>,
}

impl LogRecord {
    pub fn new(name: impl Into<String>, level: Level, msg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            created: now(),
            msg: msg.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: ToString,
    {
        self.args = args.into_iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_created(mut self, created: OffsetDateTime) -> Self {
        self.created = created;
        self
    }

    /// Render the message with its arguments.
    ///
    /// A record without arguments returns `msg` verbatim, braces included.
    pub fn message(&self) -> Result<String> {
        if self.args.is_empty() {
            return Ok(self.msg.clone());
        }
        interpolate(&self.msg, &self.args)
    }
}

/// Local time, or UTC when the local offset can't be determined
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn interpolate(msg: &str, args: &[String]) -> Result<String> {
    let mut out = String::with_capacity(msg.len());
    let mut used = 0;
    let mut chars = msg.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('{', Some('{')) => {
                chars.next();
                out.push('{');
            }
            ('}', Some('}')) => {
                chars.next();
                out.push('}');
            }
            ('{', Some('}')) => {
                chars.next();
                let arg = args
                    .get(used)
                    .ok_or(FormatError::MissingArgument { index: used })?;
                out.push_str(arg);
                used += 1;
            }
            _ => out.push(c),
        }
    }

    if used < args.len() {
        return Err(FormatError::UnusedArguments {
            used,
            provided: args.len(),
        });
    }

    Ok(out)
}
