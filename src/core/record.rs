//! Log record structure

use super::level::LogLevel;
use chrono::{DateTime, Utc};

/// One logging call, captured at the call site.
///
/// A record is immutable once constructed: the timestamp is taken at
/// creation, the template and arguments are sanitized up front, and the
/// formatter only ever reads from it. Formatting the same record twice
/// therefore yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Dotted logger name, e.g. "app.db.pool".
    pub logger: String,
    /// Message template with positional `{}` placeholders.
    pub template: String,
    /// Substitution arguments, already rendered to strings in call order.
    pub args: Vec<String>,
}

impl Record {
    /// Sanitize text to prevent log injection: newlines, carriage returns,
    /// and tabs are replaced with escape sequences so one call can never
    /// masquerade as several output lines.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger: String, template: String, args: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger,
            template: Self::sanitize(&template),
            args: args.iter().map(|a| Self::sanitize(a)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_sanitized() {
        let record = Record::new(
            LogLevel::Info,
            "app".to_string(),
            "line one\nline two".to_string(),
            Vec::new(),
        );
        assert_eq!(record.template, "line one\\nline two");
    }

    #[test]
    fn test_args_are_sanitized() {
        let record = Record::new(
            LogLevel::Info,
            "app".to_string(),
            "value: {}".to_string(),
            vec!["a\tb\r\n".to_string()],
        );
        assert_eq!(record.args[0], "a\\tb\\r\\n");
    }

    #[test]
    fn test_record_captures_call_site_data() {
        let record = Record::new(
            LogLevel::Warn,
            "app.db".to_string(),
            "slow query".to_string(),
            Vec::new(),
        );
        assert_eq!(record.level, LogLevel::Warn);
        assert_eq!(record.logger, "app.db");
        assert!(record.args.is_empty());
    }
}
