//! Output line template
//!
//! Placeholders: `{name}`, `{level}`, `{asctime}`, `{message}`.
//! `{{` and `}}` produce literal braces.

use pdlog_security::FieldRedactor;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::Level;

use crate::{FormatError, LogRecord, Result};

pub const DEFAULT_TEMPLATE: &str = "[HOLBERTON] {name} {level} {asctime}: {message}";

const ASCTIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Level,
    AscTime,
    Message,
}

/// A parsed output template
#[derive(Debug, Clone)]
pub struct LogTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LogTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(pos) = rest.find(['{', '}']) {
            literal.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                literal.push_str(&tail[..1]);
                rest = &tail[2..];
                offset += pos + 2;
                continue;
            }

            if tail.starts_with('}') {
                literal.push('}');
                rest = &tail[1..];
                offset += pos + 1;
                continue;
            }

            let close = tail
                .find('}')
                .ok_or(FormatError::UnclosedPlaceholder(offset + pos))?;
            let segment = match &tail[1..close] {
                "name" => Segment::Name,
                "level" => Segment::Level,
                "asctime" => Segment::AscTime,
                "message" => Segment::Message,
                other => return Err(FormatError::UnknownPlaceholder(other.to_string())),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
            rest = &tail[close + 1..];
            offset += pos + close + 1;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render a record; fails when the record's message can't be interpolated
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        self.render_inner(record, None)
    }

    /// Render a record with its message redacted before it is placed in the
    /// line, so the first pair is masked whatever text precedes `{message}`
    pub fn render_redacted(
        &self,
        record: &LogRecord,
        redactor: &FieldRedactor,
    ) -> Result<String> {
        self.render_inner(record, Some(redactor))
    }

    fn render_inner(
        &self,
        record: &LogRecord,
        redactor: Option<&FieldRedactor>,
    ) -> Result<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(&record.name),
                Segment::Level => out.push_str(level_name(record.level)),
                Segment::AscTime => out.push_str(&record.created.format(ASCTIME)?),
                Segment::Message => {
                    let message = record.message()?;
                    match redactor {
                        Some(redactor) => out.push_str(&redactor.redact(&message)),
                        None => out.push_str(&message),
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Level names as they appear in output lines
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::WARN => "WARNING",
        _ => level.as_str(),
    }
}

impl Default for LogTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("[HOLBERTON] ".to_string()),
                Segment::Name,
                Segment::Literal(" ".to_string()),
                Segment::Level,
                Segment::Literal(" ".to_string()),
                Segment::AscTime,
                Segment::Literal(": ".to_string()),
                Segment::Message,
            ],
        }
    }
}
