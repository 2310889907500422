// RUNTIME PREFERENCES (User Experience)

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output at all
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether console lines carry a local timestamp
    pub include_timestamps: bool,

    /// Whether events carry the function/line statement context
    pub include_statement_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_timestamps: env::var(env_vars::LOGGING_INCLUDE_TIMESTAMPS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_statement_context: env::var(env_vars::LOGGING_INCLUDE_STATEMENT_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingPreferences {
    /// Whether to emit a debug event after every processing stage
    pub trace_stages: bool,

    /// Whether to log candidate costs during overload resolution
    pub trace_overload_resolution: bool,

    /// Whether to log a summary line per compiled statement
    pub log_statement_summaries: bool,
}

impl Default for ProcessingPreferences {
    fn default() -> Self {
        Self {
            trace_stages: env::var(env_vars::PROCESSING_TRACE_STAGES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            trace_overload_resolution: env::var(env_vars::PROCESSING_TRACE_OVERLOADS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_statement_summaries: env::var(env_vars::PROCESSING_STATEMENT_SUMMARIES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub processing: ProcessingPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse runtime preferences from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid runtime configuration: {}", e))
    }

    /// Load runtime preferences from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Processing
    pub const PROCESSING_TRACE_STAGES: &str = "LEMON_PROCESSING_TRACE_STAGES";
    pub const PROCESSING_TRACE_OVERLOADS: &str = "LEMON_PROCESSING_TRACE_OVERLOADS";
    pub const PROCESSING_STATEMENT_SUMMARIES: &str = "LEMON_PROCESSING_STATEMENT_SUMMARIES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LEMON_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LEMON_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LEMON_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_TIMESTAMPS: &str = "LEMON_LOGGING_INCLUDE_TIMESTAMPS";
    pub const LOGGING_INCLUDE_STATEMENT_CONTEXT: &str = "LEMON_LOGGING_INCLUDE_STATEMENT_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [processing]
            trace_stages = true

            [logging]
            min_log_level = "Debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert!(config.processing.trace_stages);
        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_runtime_config_rejects_bad_toml() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = 42");
        assert!(result.is_err());
    }

    #[test]
    fn test_runtime_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemon.toml");
        std::fs::write(&path, "[processing]\nlog_statement_summaries = true\n").unwrap();

        let config = RuntimeConfig::from_toml_file(&path).unwrap();
        assert!(config.processing.log_statement_summaries);
    }
}
