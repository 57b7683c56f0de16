use std::io::{self, BufRead, Write};

use anyhow::Result;
use pdlog_config::Config;
use pdlog_security::FieldRedactor;

pub fn handle(
    config: &Config,
    fields: Vec<String>,
    redaction: Option<String>,
    separator: Option<char>,
    messages: Vec<String>,
) -> Result<()> {
    let redactor = build_redactor(config, fields, redaction, separator)?;
    let stdout = io::stdout();

    if messages.is_empty() {
        filter_lines(&redactor, io::stdin().lock(), stdout.lock())?;
    } else {
        write_messages(&redactor, &messages, stdout.lock())?;
    }

    Ok(())
}

/// Command-line options override the configured redaction settings
fn build_redactor(
    config: &Config,
    fields: Vec<String>,
    redaction: Option<String>,
    separator: Option<char>,
) -> Result<FieldRedactor> {
    let fields = if fields.is_empty() {
        config.redaction.fields.clone()
    } else {
        fields
    };
    let redaction = redaction.unwrap_or_else(|| config.redaction.token.clone());
    let separator = separator.unwrap_or(config.redaction.separator);

    Ok(FieldRedactor::new(&fields, &redaction, separator)?)
}

fn write_messages<W: Write>(
    redactor: &FieldRedactor,
    messages: &[String],
    mut output: W,
) -> io::Result<()> {
    for message in messages {
        writeln!(output, "{}", redactor.redact(message))?;
    }
    output.flush()
}

/// Redact `input` line by line into `output`
fn filter_lines<R: BufRead, W: Write>(
    redactor: &FieldRedactor,
    input: R,
    mut output: W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        writeln!(output, "{}", redactor.redact(&line))?;
    }
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_lines() {
        let redactor = FieldRedactor::new(&["password"], "***", ';').unwrap();
        let input = "name=Bob; password=hunter2;\nname=Al;\n";
        let mut output = Vec::new();

        filter_lines(&redactor, input.as_bytes(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name=Bob; password=***;\nname=Al;\n"
        );
    }

    fn filter(redactor: &FieldRedactor, messages: &[&str]) -> String {
        let messages: Vec<String> = messages.iter().map(|m| m.to_string()).collect();
        let mut output = Vec::new();
        write_messages(redactor, &messages, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_options_override_config() {
        let redactor = build_redactor(
            &Config::default(),
            vec!["ssn".to_string()],
            Some("x".to_string()),
            Some('|'),
        )
        .unwrap();

        assert_eq!(filter(&redactor, &["ssn=1|name=a"]), "ssn=x|name=a\n");
        assert_eq!(
            filter(&redactor, &["password=p|ssn=2"]),
            "password=p|ssn=x\n"
        );
    }

    #[test]
    fn test_config_fields_apply_by_default() {
        let redactor = build_redactor(&Config::default(), Vec::new(), None, None).unwrap();

        assert_eq!(
            filter(
                &redactor,
                &["name=Bob; password=hunter2; date_of_birth=1990-01-01;", "ssn=1;"]
            ),
            "name=Bob; password=***; date_of_birth=***;\nssn=1;\n"
        );
    }
}
