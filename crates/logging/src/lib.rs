//! Multi-destination structured logging for tracelens
//!
//! This crate provides the logging surface around the demystifier core:
//! - Fan-out to console and file sinks with pretty, compact and JSON formats
//! - High-precision timestamps (microsecond resolution)
//! - A named-logger registry with per-name level overrides
//! - Log-path sanitization and a write preflight on the log directory
//! - A bridge that feeds rendered exception traces into the sinks verbatim
//!
//! Sinks are built once at initialization from [`LoggingConfig`]; there is
//! no runtime reconfiguration of destinations.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub mod config;
pub mod error;
pub mod exception;
pub mod registry;
pub mod sanitize;

pub use config::{LoggingConfig, SinkConfig, SinkFormat};
pub use error::{LoggingError, LoggingResult};
pub use exception::log_exception;
pub use registry::{LoggerRegistry, NamedLogger};
pub use sanitize::{preflight, sanitize_file_name};

use registry::parse_level;

/// Global logger instance
static GLOBAL_LOGGER: OnceCell<Arc<Logger>> = OnceCell::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Timestamp formatter with optional microsecond resolution
struct PrecisionTimestamp {
    microseconds: bool,
}

impl FormatTime for PrecisionTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        if self.microseconds {
            write!(
                w,
                "{}.{:06}",
                now.format("%Y-%m-%d %H:%M:%S"),
                now.timestamp_subsec_micros()
            )
        } else {
            write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
        }
    }
}

/// Logger implementation
pub struct Logger {
    /// Configuration the sinks were built from
    pub config: LoggingConfig,

    /// Worker guards keeping non-blocking file writers alive
    _guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Build the sink layers and install the subscriber
    pub fn new(config: LoggingConfig) -> LoggingResult<Self> {
        // Fail at startup, not at the first lost log line.
        if config.file_sinks().next().is_some() {
            preflight(Path::new(&config.log_dir))?;
        }

        let mut guards = Vec::new();
        let mut layers: Vec<BoxedLayer> = Vec::new();

        for sink in config.console_sinks() {
            layers.push(console_layer(&config, sink));
        }
        for sink in config.file_sinks() {
            layers.push(file_layer(&config, sink, &mut guards)?);
        }

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|err| LoggingError::Subscriber(err.to_string()))?;

        LoggerRegistry::global().set_default_level(parse_level(&config.default_level));

        Ok(Self {
            config,
            _guards: guards,
        })
    }

    /// Initialize the global logger
    pub fn init(config: LoggingConfig) -> LoggingResult<()> {
        let logger = Self::new(config)?;
        GLOBAL_LOGGER
            .set(Arc::new(logger))
            .map_err(|_| LoggingError::AlreadyInitialized)
    }

    /// Get the global logger
    pub fn global() -> LoggingResult<Arc<Logger>> {
        GLOBAL_LOGGER.get().cloned().ok_or(LoggingError::NotInitialized)
    }
}

fn console_layer(config: &LoggingConfig, sink: &SinkConfig) -> BoxedLayer {
    let base = fmt::layer()
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_timer(PrecisionTimestamp {
            microseconds: config.include_high_precision_timestamps,
        })
        .with_ansi(true);

    // RUST_LOG takes precedence over the configured console level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&sink.level));

    match sink.format {
        SinkFormat::Pretty => base.pretty().with_filter(filter).boxed(),
        SinkFormat::Compact => base.compact().with_filter(filter).boxed(),
        SinkFormat::Json => base.json().with_filter(filter).boxed(),
    }
}

fn file_layer(
    config: &LoggingConfig,
    sink: &SinkConfig,
    guards: &mut Vec<WorkerGuard>,
) -> LoggingResult<BoxedLayer> {
    let file_name = sanitize_file_name(sink.path.as_deref().unwrap_or_default());
    let appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);

    let base = fmt::layer()
        .with_writer(writer)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_timer(PrecisionTimestamp {
            microseconds: config.include_high_precision_timestamps,
        })
        .with_ansi(false);

    let filter = EnvFilter::new(&sink.level);

    Ok(match sink.format {
        SinkFormat::Pretty => base.with_filter(filter).boxed(),
        SinkFormat::Compact => base.compact().with_filter(filter).boxed(),
        SinkFormat::Json => base.json().with_filter(filter).boxed(),
    })
}

/// Initialize the logging system with default configuration
pub fn init_default() -> LoggingResult<()> {
    Logger::init(LoggingConfig::default())
}

/// Initialize the logging system from a JSON configuration file
pub fn init_from_file(path: &str) -> LoggingResult<()> {
    Logger::init(LoggingConfig::load_from_file(path)?)
}

/// Macro for initializing logging
#[macro_export]
macro_rules! init_logging {
    () => {
        $crate::init_default().expect("Failed to initialize logging system")
    };
    ($path:expr) => {
        $crate::init_from_file($path).expect("Failed to initialize logging system")
    };
}

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_before_init_errors() {
        // No test in this binary installs the global logger.
        assert!(matches!(
            Logger::global(),
            Err(LoggingError::NotInitialized)
        ));
    }
}
