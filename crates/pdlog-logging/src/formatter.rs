//! Redacting formatter
//!
//! Renders a [`LogRecord`] through the base template with its message
//! masked, then masks the configured fields over the whole line. Also usable as a
//! `tracing-subscriber` event formatter.

use std::fmt;

use pdlog_security::{DEFAULT_REDACTION, DEFAULT_SEPARATOR, FieldRedactor};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::record::now;
use crate::{LogRecord, LogTemplate, Result};

pub struct RedactingFormatter {
    redactor: FieldRedactor,
    template: LogTemplate,
}

impl RedactingFormatter {
    /// Formatter with the default token (`***`), separator (`;`) and template
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        Ok(Self {
            redactor: FieldRedactor::new(fields, DEFAULT_REDACTION, DEFAULT_SEPARATOR)?,
            template: LogTemplate::default(),
        })
    }

    pub fn with_options<S: AsRef<str>>(
        fields: &[S],
        redaction: &str,
        separator: char,
        template: &str,
    ) -> Result<Self> {
        Ok(Self {
            redactor: FieldRedactor::new(fields, redaction, separator)?,
            template: LogTemplate::parse(template)?,
        })
    }

    pub fn fields(&self) -> &[String] {
        self.redactor.fields()
    }

    pub fn redactor(&self) -> &FieldRedactor {
        &self.redactor
    }

    pub fn template(&self) -> &LogTemplate {
        &self.template
    }

    /// Render `record` and redact the result.
    ///
    /// The message is redacted on its own before the line is assembled, then
    /// the whole line is redacted again so header text is masked too.
    ///
    /// Errors from rendering the base template come back unchanged.
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let line = self.template.render_redacted(record, &self.redactor)?;
        Ok(self.redactor.redact(&line).into_owned())
    }
}

impl<S, N> FormatEvent<S, N> for RedactingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let name = visitor
            .logger
            .take()
            .unwrap_or_else(|| metadata.target().to_string());
        let record = LogRecord {
            name,
            level: *metadata.level(),
            created: now(),
            msg: visitor.into_message(),
            args: Vec::new(),
        };

        let line = self.format(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

/// Collects the message, the `logger` field and any other event fields
#[derive(Default)]
struct EventVisitor {
    message: String,
    logger: Option<String>,
    extra: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "logger" => self.logger = Some(value),
            name => self.extra.push((name, value)),
        }
    }

    /// Extra fields are appended as `key=value;` pairs so they get redacted too
    fn into_message(self) -> String {
        let mut message = self.message;
        for (key, value) in self.extra {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&format!("{key}={value};"));
        }
        message
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatError;
    use time::macros::datetime;
    use tracing::Level;

    fn record(msg: &str) -> LogRecord {
        LogRecord::new("user_data", Level::INFO, msg)
            .with_created(datetime!(2024-03-05 14:07:09.123 UTC))
    }

    #[test]
    fn test_format_redacts_message() {
        let formatter = RedactingFormatter::new(&["password"]).unwrap();
        let line = formatter.format(&record("name=Bob;password=hunter2;")).unwrap();

        assert_eq!(
            line,
            "[HOLBERTON] user_data INFO 2024-03-05 14:07:09,123: name=Bob;password=***;"
        );
        assert!(line.ends_with("name=Bob;password=***;"));
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn test_format_redacts_interpolated_args() {
        let formatter = RedactingFormatter::new(&["password", "date_of_birth"]).unwrap();
        let record = record("name={}; password={}; date_of_birth={};")
            .with_args(["Bob", "hunter2", "1990-01-01"]);

        let line = formatter.format(&record).unwrap();
        assert!(line.ends_with(": name=Bob; password=***; date_of_birth=***;"));
    }

    #[test]
    fn test_format_does_not_mutate_record() {
        let formatter = RedactingFormatter::new(&["password"]).unwrap();
        let record = record("password=hunter2;");

        formatter.format(&record).unwrap();
        assert_eq!(record.msg, "password=hunter2;");
    }

    #[test]
    fn test_format_propagates_argument_errors() {
        let formatter = RedactingFormatter::new(&["password"]).unwrap();
        let record = record("name={}; password={};").with_args(["Bob"]);

        assert!(matches!(
            formatter.format(&record),
            Err(FormatError::MissingArgument { index: 1 })
        ));
    }

    #[test]
    fn test_custom_options() {
        let formatter =
            RedactingFormatter::with_options(&["ssn"], "[hidden]", '|', "{level} {message}")
                .unwrap();
        let line = formatter.format(&record("name=Al|ssn=123-45-6789|")).unwrap();
        assert_eq!(line, "INFO name=Al|ssn=[hidden]|");
    }

    #[test]
    fn test_template_without_space_before_message() {
        for template in ["{name}:{message}", "{level}|{message}"] {
            let formatter =
                RedactingFormatter::with_options(&["password"], "***", ';', template).unwrap();
            let line = formatter
                .format(&record("password=hunter2; name=Bob;"))
                .unwrap();
            assert!(!line.contains("hunter2"), "{template}: {line}");
            assert!(line.ends_with("password=***; name=Bob;"));
        }
    }

    #[test]
    fn test_invalid_template() {
        let result = RedactingFormatter::with_options(&["ssn"], "***", ';', "{when} {message}");
        assert!(matches!(result, Err(FormatError::UnknownPlaceholder(_))));
    }

    #[test]
    fn test_tracing_event_is_redacted() {
        let sink = crate::MemorySink::new();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .event_format(RedactingFormatter::new(&["password"]).unwrap())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(logger = "auth", password = "hunter2", "login user=bob;");
            tracing::warn!("password=swordfish;");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[HOLBERTON] auth INFO "));
        assert!(lines[0].ends_with(": login user=bob; password=***;"));
        assert!(lines[1].contains(" WARNING "));
        assert!(lines[1].ends_with(": password=***;"));
        assert!(!sink.contents().contains("swordfish"));
    }

    #[test]
    fn test_visitor_appends_extra_fields() {
        let visitor = EventVisitor {
            message: "login".to_string(),
            logger: None,
            extra: vec![("user", "bob".to_string()), ("password", "x".to_string())],
        };
        assert_eq!(visitor.into_message(), "login user=bob; password=x;");
    }
}
