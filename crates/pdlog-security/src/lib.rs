//! Field redaction for `key=value;` log messages
//!
//! This crate provides:
//! - [`FieldRedactor`] - a precompiled redactor for a fixed set of field names
//! - [`redact`] - one-shot convenience wrapper around it

pub mod error;

use std::borrow::Cow;

use regex::{Captures, Regex};

pub use error::{RedactError, Result};

/// Token substituted for sensitive values unless configured otherwise
pub const DEFAULT_REDACTION: &str = "***";

/// Pair delimiter used unless configured otherwise
pub const DEFAULT_SEPARATOR: char = ';';

/// Masks the values of explicitly named fields.
///
/// All field names are matched in a single scan. A field only matches when
/// its name starts a key (beginning of text, or right after the separator,
/// `;` or whitespace) and is immediately followed by `=`. The value runs up to
/// the next separator or `;`.
#[derive(Debug, Clone)]
pub struct FieldRedactor {
    fields: Vec<String>,
    redaction: String,
    separator: char,
    // None when there is nothing to redact
    pattern: Option<Regex>,
}

impl FieldRedactor {
    pub fn new<S: AsRef<str>>(fields: &[S], redaction: &str, separator: char) -> Result<Self> {
        let fields: Vec<String> = fields
            .iter()
            .map(|f| f.as_ref().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        let pattern = if fields.is_empty() {
            None
        } else {
            Some(Regex::new(&build_pattern(&fields, separator))?)
        };

        Ok(Self {
            fields,
            redaction: redaction.to_string(),
            separator,
            pattern,
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Redact every listed field in `message`.
    ///
    /// Borrows the input when nothing matched.
    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(message);
        };

        pattern.replace_all(message, |caps: &Captures| {
            format!("{}{}={}", &caps["lead"], &caps["field"], self.redaction)
        })
    }
}

/// Replace the value of every `field=value` pair in `message` with `redaction`.
///
/// Never fails: if the pattern cannot be built the message comes back as is.
pub fn redact<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: char,
) -> String {
    match FieldRedactor::new(fields, redaction, separator) {
        Ok(redactor) => redactor.redact(message).into_owned(),
        Err(_) => message.to_string(),
    }
}

fn build_pattern(fields: &[String], separator: char) -> String {
    let sep = regex::escape(&separator.to_string());
    let names = fields
        .iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");

    format!(r"(?P<lead>^|[;{sep}\s])(?P<field>{names})=[^;{sep}]*")
}
