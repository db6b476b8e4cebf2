//! Configuration for the logging surface

use serde::{Deserialize, Serialize};

use crate::error::LoggingResult;

/// Output format for a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkFormat {
    /// Pretty-printed text with ANSI colors
    Pretty,

    /// Compact single-line text
    Compact,

    /// Structured JSON
    Json,
}

/// Configuration for one log destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Whether this sink is enabled
    pub enabled: bool,

    /// Log level for this sink
    pub level: String,

    /// Output format
    pub format: SinkFormat,

    /// Output file name, relative to the log directory (console sinks have none)
    pub path: Option<String>,
}

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level
    pub default_level: String,

    /// Whether to include file and line information
    pub include_file_line: bool,

    /// Whether to include thread IDs
    pub include_thread_id: bool,

    /// Whether to include high-precision timestamps
    pub include_high_precision_timestamps: bool,

    /// Directory file sinks write into
    pub log_dir: String,

    /// Whether rendered exception traces hide infrastructure frames
    pub filter_infrastructure: bool,

    /// Log destinations
    pub sinks: Vec<SinkConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            include_file_line: true,
            include_thread_id: true,
            include_high_precision_timestamps: true,
            log_dir: "logs".to_string(),
            filter_infrastructure: true,
            sinks: vec![
                SinkConfig {
                    name: "console".to_string(),
                    enabled: true,
                    level: "info".to_string(),
                    format: SinkFormat::Pretty,
                    path: None,
                },
                SinkConfig {
                    name: "file".to_string(),
                    enabled: true,
                    level: "debug".to_string(),
                    format: SinkFormat::Json,
                    path: Some("tracelens.log".to_string()),
                },
            ],
        }
    }
}

impl LoggingConfig {
    /// Load a configuration from a JSON file
    pub fn load_from_file(path: &str) -> LoggingResult<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Enabled sinks that write to files
    pub fn file_sinks(&self) -> impl Iterator<Item = &SinkConfig> {
        self.sinks.iter().filter(|s| s.enabled && s.path.is_some())
    }

    /// Enabled sinks that write to the console
    pub fn console_sinks(&self) -> impl Iterator<Item = &SinkConfig> {
        self.sinks.iter().filter(|s| s.enabled && s.path.is_none())
    }
}
