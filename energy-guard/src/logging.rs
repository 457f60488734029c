//! Logging utilities and configuration for energy-guard.
//!
//! The engine logs through `tracing`. [`LogConfig`] controls how chatty a
//! validation run is; [`setup`] installs a `tracing-subscriber` for binaries.

use tracing::Level;

/// Logging configuration for a validation run.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for engine components
    pub base_level: Level,
    /// Whether to log every finding as it is produced
    pub log_record_details: bool,
    /// Whether to log file reads and entry counts
    pub log_data_operations: bool,
    /// Maximum length for logged raw values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_record_details: false,
            log_data_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_record_details: true,
            log_data_operations: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_record_details: false,
            log_data_operations: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// True when debug-level events should be produced.
    pub fn debug_enabled(&self) -> bool {
        self.base_level >= Level::DEBUG
    }
}

/// Macro for performance-sensitive debug logging.
///
/// Arguments are only evaluated when the configuration allows debug output.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional per-record finding logging.
#[macro_export]
macro_rules! log_record {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_record_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional data operation logging.
#[macro_export]
macro_rules! log_data_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_data_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to the maximum field length if needed.
///
/// Cuts on a character boundary, so multi-byte text (Thai region names) is
/// never split.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Utilities for installing a `tracing` subscriber.
pub mod setup {
    use tracing::Level;

    /// Configuration for the process-wide logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for energy-guard components specifically
        pub guard_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                guard_level: Level::INFO,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                guard_level: Level::WARN,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                guard_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for energy-guard components.
        pub fn with_guard_level(mut self, level: Level) -> Self {
            self.guard_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                let guard = self.guard_level.as_str().to_lowercase();
                format!(
                    "{},energy_guard={guard},energy_guard_cli={guard}",
                    self.level.as_str().to_lowercase(),
                )
            }
        }
    }

    /// Installs a global subscriber writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use energy_guard::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_presets() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::INFO);
        assert!(!config.log_record_details);
        assert!(!config.debug_enabled());

        let verbose = LogConfig::verbose();
        assert!(verbose.log_record_details);
        assert!(verbose.debug_enabled());

        let production = LogConfig::production();
        assert!(!production.log_data_operations);
        assert_eq!(production.max_field_length, 128);
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text", 10),
            "this is a ...(truncated)"
        );
    }

    #[test]
    fn test_truncate_field_respects_char_boundaries() {
        // Each Thai character is three bytes in UTF-8.
        let truncated = truncate_field("ภาคกลาง", 4);
        assert_eq!(truncated, "ภ...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        let config = LoggingConfig::default();
        assert_eq!(
            config.env_filter(),
            "warn,energy_guard=info,energy_guard_cli=info"
        );

        let custom = LoggingConfig::default().with_env_filter("energy_guard=trace");
        assert_eq!(custom.env_filter(), "energy_guard=trace");

        let dev = LoggingConfig::development().with_guard_level(Level::TRACE);
        assert_eq!(
            dev.env_filter(),
            "debug,energy_guard=trace,energy_guard_cli=trace"
        );
    }
}
