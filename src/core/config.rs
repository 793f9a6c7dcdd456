//! Level configuration and hierarchical filtering
//!
//! Loggers are named in a dotted hierarchy ("app.db.pool"). A logger with
//! no explicit level inherits from its nearest ancestor with one, falling
//! back to the root level. Configurations are immutable snapshots: the
//! registry swaps a whole `Arc<LevelConfig>` on reload, so concurrent
//! readers always see either the old or the new configuration in full.

use super::error::{MinilogError, Result};
use super::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Snapshot of level thresholds: a root default plus explicit levels for
/// dotted logger-name prefixes.
///
/// # Example
///
/// ```
/// use minilog::{LevelConfig, LogLevel};
///
/// let config = LevelConfig::new()
///     .with_root(LogLevel::Info)
///     .with_logger("app.db", LogLevel::Trace);
///
/// assert!(config.is_enabled("app.db.pool", LogLevel::Debug));
/// assert!(!config.is_enabled("app.http", LogLevel::Debug));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Fallback level when no ancestor has an explicit one
    #[serde(default)]
    root: LogLevel,

    /// Explicit levels keyed by dotted logger name
    #[serde(default)]
    loggers: BTreeMap<String, LogLevel>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelConfig {
    /// Create a configuration with root level Info and no explicit levels
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: LogLevel::default(),
            loggers: BTreeMap::new(),
        }
    }

    /// Set the root level
    #[must_use]
    pub fn with_root(mut self, level: LogLevel) -> Self {
        self.root = level;
        self
    }

    /// Set an explicit level for a logger name (and, by inheritance, all
    /// of its descendants without their own explicit level)
    #[must_use]
    pub fn with_logger(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.loggers.insert(name.into(), level);
        self
    }

    /// The root level
    pub fn root(&self) -> LogLevel {
        self.root
    }

    /// Resolve the effective level for a logger name.
    ///
    /// Walks from the most specific prefix to the least specific
    /// ("a.b.c" → "a.b" → "a") and returns the first explicit level found,
    /// or the root level. The walk borrows slices of `name` and performs
    /// no allocation.
    pub fn effective_level(&self, name: &str) -> LogLevel {
        if let Some(level) = self.loggers.get(name) {
            return *level;
        }
        let mut prefix = name;
        while let Some(idx) = prefix.rfind('.') {
            prefix = &prefix[..idx];
            if let Some(level) = self.loggers.get(prefix) {
                return *level;
            }
        }
        self.root
    }

    /// Whether a call at `level` from logger `name` should produce output
    #[inline]
    pub fn is_enabled(&self, name: &str, level: LogLevel) -> bool {
        level >= self.effective_level(name)
    }

    /// Parse a configuration from a JSON string.
    ///
    /// ```
    /// use minilog::{LevelConfig, LogLevel};
    ///
    /// let config = LevelConfig::from_json_str(
    ///     r#"{ "root": "INFO", "loggers": { "app.db": "DEBUG" } }"#,
    /// ).unwrap();
    /// assert_eq!(config.root(), LogLevel::Info);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check structural validity of logger names.
    ///
    /// Names must be non-empty and must not contain empty dotted segments;
    /// a reload with an invalid configuration is rejected so the previous
    /// one stays active.
    pub fn validate(&self) -> Result<()> {
        for name in self.loggers.keys() {
            if name.is_empty() {
                return Err(MinilogError::config("logger name must not be empty"));
            }
            if name.split('.').any(str::is_empty) {
                return Err(MinilogError::config(format!(
                    "logger name '{}' contains an empty segment",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_fallback() {
        let config = LevelConfig::new().with_root(LogLevel::Warn);
        assert_eq!(config.effective_level("anything.at.all"), LogLevel::Warn);
    }

    #[test]
    fn test_exact_match_wins() {
        let config = LevelConfig::new()
            .with_logger("app", LogLevel::Warn)
            .with_logger("app.db", LogLevel::Trace);
        assert_eq!(config.effective_level("app.db"), LogLevel::Trace);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let config = LevelConfig::new()
            .with_root(LogLevel::Error)
            .with_logger("app", LogLevel::Warn)
            .with_logger("app.db", LogLevel::Debug);

        assert_eq!(config.effective_level("app.db.pool.conn"), LogLevel::Debug);
        assert_eq!(config.effective_level("app.http"), LogLevel::Warn);
        assert_eq!(config.effective_level("other"), LogLevel::Error);
    }

    // The worked example: root INFO, "app.db" has no explicit level.
    #[test]
    fn test_inherited_root_filtering() {
        let config = LevelConfig::new().with_root(LogLevel::Info);
        assert!(!config.is_enabled("app.db", LogLevel::Debug));
        assert!(config.is_enabled("app.db", LogLevel::Info));
    }

    #[test]
    fn test_sibling_prefix_is_not_an_ancestor() {
        // "app.database" is not an ancestor of "app.data"
        let config = LevelConfig::new()
            .with_root(LogLevel::Info)
            .with_logger("app.database", LogLevel::Trace);
        assert_eq!(config.effective_level("app.data"), LogLevel::Info);
    }

    #[test]
    fn test_json_round_trip() {
        let config = LevelConfig::new()
            .with_root(LogLevel::Warn)
            .with_logger("app.db", LogLevel::Debug);

        let json = serde_json::to_string(&config).unwrap();
        let parsed = LevelConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_defaults() {
        let config = LevelConfig::from_json_str("{}").unwrap();
        assert_eq!(config.root(), LogLevel::Info);
        assert!(config.loggers.is_empty());
    }

    #[test]
    fn test_invalid_level_name_rejected() {
        let result = LevelConfig::from_json_str(r#"{ "root": "VERBOSE" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_segment_rejected() {
        let result =
            LevelConfig::from_json_str(r#"{ "loggers": { "app..db": "DEBUG" } }"#);
        assert!(matches!(
            result,
            Err(MinilogError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = LevelConfig::from_json_str(r#"{ "loggers": { "": "DEBUG" } }"#);
        assert!(result.is_err());
    }
}
