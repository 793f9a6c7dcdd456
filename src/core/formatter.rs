//! Record formatting
//!
//! Turns an immutable [`Record`] into one serialized line: positional `{}`
//! placeholders substituted in order, timestamp rendered by a fixed
//! [`TimestampFormat`], level as a fixed-width token. Malformed templates
//! never fail; a diagnostic suffix notes the mismatch instead.

use super::record::Record;
use super::timestamp::TimestampFormat;

/// Output format for serialized records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] app.db - connected`
    #[default]
    Text,

    /// JSON object per line, for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"INFO","logger":"app.db","message":"connected"}`
    Json,
}

/// Configured formatter shared by the dispatch path.
///
/// Formatting is a pure function of the record and this configuration, so
/// formatting the same record twice yields byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl Formatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set a custom strftime-compatible timestamp format
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Serialize a record to one output line (without trailing newline)
    pub fn format(&self, record: &Record) -> String {
        match self.output_format {
            OutputFormat::Text => self.format_text(record),
            OutputFormat::Json => self.format_json(record),
        }
    }

    fn format_text(&self, record: &Record) -> String {
        let (message, mismatch) = render_template(&record.template, &record.args);
        let mut line = format!(
            "[{}] [{:5}] {} - {}",
            self.timestamp_format.format(&record.timestamp),
            record.level.as_str(),
            record.logger,
            message
        );
        if let Some(diagnostic) = mismatch {
            line.push(' ');
            line.push_str(&diagnostic);
        }
        line
    }

    fn format_json(&self, record: &Record) -> String {
        let (message, mismatch) = render_template(&record.template, &record.args);

        let mut json_obj = serde_json::Map::new();
        let timestamp = if self.timestamp_format.is_numeric() {
            // Unquoted numeric timestamps for unix formats
            match self.timestamp_format {
                TimestampFormat::Unix => {
                    serde_json::Value::Number(record.timestamp.timestamp().into())
                }
                _ => serde_json::Value::Number(record.timestamp.timestamp_millis().into()),
            }
        } else {
            serde_json::Value::String(self.timestamp_format.format(&record.timestamp))
        };
        json_obj.insert("timestamp".to_string(), timestamp);
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        json_obj.insert(
            "logger".to_string(),
            serde_json::Value::String(record.logger.clone()),
        );
        json_obj.insert("message".to_string(), serde_json::Value::String(message));
        if let Some(diagnostic) = mismatch {
            json_obj.insert(
                "template_mismatch".to_string(),
                serde_json::Value::String(diagnostic),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

/// Substitute positional `{}` placeholders in call order.
///
/// Substitution proceeds as far as the arguments allow. On a count
/// mismatch the remaining placeholders are left verbatim (or the extra
/// arguments ignored) and a diagnostic is returned for the formatter to
/// append, so a bad template degrades instead of failing.
pub fn render_template(template: &str, args: &[String]) -> (String, Option<String>) {
    let args_len: usize = args.iter().map(String::len).sum();
    let mut out = String::with_capacity(template.len() + args_len);

    let mut placeholders = 0;
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        match args.get(placeholders) {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        placeholders += 1;
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);

    if placeholders == args.len() {
        (out, None)
    } else {
        let diagnostic = format!(
            "[template expected {} args, got {}]",
            placeholders,
            args.len()
        );
        (out, Some(diagnostic))
    }
}
