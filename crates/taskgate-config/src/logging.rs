use std::env;

use crate::non_empty;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Default filter directive for the application crates, e.g. `info` or `debug`.
    pub level: String,
    pub format: LogFormat,
    /// When set, a daily-rotated JSON log file is written here as well.
    pub dir: Option<String>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match non_empty(&lookup, "LOG_LEVEL").map(|v| v.to_lowercase()) {
            Some(level) if ["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) => {
                level
            }
            _ => "info".to_string(),
        };

        let format = match non_empty(&lookup, "LOG_FORMAT").map(|v| v.to_lowercase()) {
            Some(format) if format == "text" => LogFormat::Text,
            _ => LogFormat::Json,
        };

        Self {
            level,
            format,
            dir: non_empty(&lookup, "LOG_DIR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.dir.is_none());
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = LogConfig::from_lookup(|key| match key {
            "LOG_LEVEL" => Some("verbose".to_string()),
            "LOG_FORMAT" => Some("TEXT".to_string()),
            _ => None,
        });
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
    }
}
