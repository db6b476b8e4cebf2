//! Named-logger registry
//!
//! Call sites obtain lightweight named handles; each name may carry a level
//! override that beats the configured default. The registry is a fixed
//! process-wide singleton; handles are cheap and freely clonable.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, error, info, trace, warn, Level};

static REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::default);

/// Parse a level string, falling back to INFO for unknown values
pub(crate) fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

/// Registry of named loggers with per-name level overrides
pub struct LoggerRegistry {
    /// Level applied when a name has no override
    default_level: RwLock<Level>,

    /// Per-name level overrides
    overrides: DashMap<String, Level>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self {
            default_level: RwLock::new(Level::INFO),
            overrides: DashMap::new(),
        }
    }
}

impl LoggerRegistry {
    /// Get the process-wide registry
    pub fn global() -> &'static LoggerRegistry {
        &REGISTRY
    }

    /// Set the default level applied to names without an override
    pub fn set_default_level(&self, level: Level) {
        *self.default_level.write() = level;
    }

    /// Set a level override for one logger name
    pub fn set_level(&self, name: &str, level: Level) {
        self.overrides.insert(name.to_string(), level);
    }

    /// Remove a level override, reverting the name to the default
    pub fn clear_level(&self, name: &str) {
        self.overrides.remove(name);
    }

    /// Effective level for a logger name
    pub fn effective_level(&self, name: &str) -> Level {
        self.overrides
            .get(name)
            .map(|entry| *entry.value())
            .unwrap_or(*self.default_level.read())
    }

    /// Create a named logger handle
    pub fn logger(&self, name: &str) -> NamedLogger {
        NamedLogger {
            name: name.to_string(),
        }
    }
}

/// Lightweight handle for emitting under a logger name
#[derive(Debug, Clone)]
pub struct NamedLogger {
    name: String,
}

impl NamedLogger {
    /// Logger name this handle emits under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether events at `level` pass this logger's effective level
    pub fn enabled(&self, level: Level) -> bool {
        level <= LoggerRegistry::global().effective_level(&self.name)
    }

    /// Emit a message at the given level if enabled
    pub fn log(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }
        if level == Level::ERROR {
            error!(logger = %self.name, "{message}");
        } else if level == Level::WARN {
            warn!(logger = %self.name, "{message}");
        } else if level == Level::INFO {
            info!(logger = %self.name, "{message}");
        } else if level == Level::DEBUG {
            debug!(logger = %self.name, "{message}");
        } else {
            trace!(logger = %self.name, "{message}");
        }
    }

    /// Emit at ERROR
    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    /// Emit at WARN
    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    /// Emit at INFO
    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    /// Emit at DEBUG
    pub fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }

    #[test]
    fn test_override_beats_default() {
        let registry = LoggerRegistry::default();
        registry.set_default_level(Level::INFO);
        registry.set_level("noisy.module", Level::ERROR);

        assert_eq!(registry.effective_level("noisy.module"), Level::ERROR);
        assert_eq!(registry.effective_level("other.module"), Level::INFO);

        registry.clear_level("noisy.module");
        assert_eq!(registry.effective_level("noisy.module"), Level::INFO);
    }

    #[test]
    fn test_handle_enablement() {
        let registry = LoggerRegistry::global();
        registry.set_level("quiet", Level::WARN);

        let logger = registry.logger("quiet");
        assert_eq!(logger.name(), "quiet");
        assert!(logger.enabled(Level::ERROR));
        assert!(logger.enabled(Level::WARN));
        assert!(!logger.enabled(Level::INFO));

        registry.clear_level("quiet");
    }
}
