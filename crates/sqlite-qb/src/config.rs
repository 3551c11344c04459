//! Settings for [`Statement::build_with`](crate::stmt::Statement::build_with).

#[cfg(feature = "tracing")]
use tracing::Level;

/// Configuration for rendering finished statements.
///
/// Only affects buffer allocation and the emitted `tracing` event, never the
/// rendered text.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Bytes reserved for the output buffer before rendering.
    pub initial_capacity: usize,
    /// Truncate logged SQL (in bytes, on a char boundary). `None` means no
    /// truncation.
    pub max_logged_sql_length: Option<usize>,
    /// Tracing event level for successful builds.
    #[cfg(feature = "tracing")]
    pub log_level: Level,
    /// Whether builds emit a tracing event at all.
    pub logging_enabled: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 128,
            max_logged_sql_length: Some(200),
            #[cfg(feature = "tracing")]
            log_level: Level::DEBUG,
            logging_enabled: true,
        }
    }
}

impl BuildConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the maximum logged SQL length.
    pub fn with_max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Log SQL in full.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }

    /// Override the tracing event level.
    #[cfg(feature = "tracing")]
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn enable_logging(mut self) -> Self {
        self.logging_enabled = true;
        self
    }

    pub fn disable_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuildConfig::new();
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.max_logged_sql_length, Some(200));
        assert!(config.logging_enabled);
    }

    #[test]
    fn setters_chain() {
        let config = BuildConfig::new()
            .with_initial_capacity(16)
            .with_max_logged_sql_length(10)
            .disable_logging();
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.max_logged_sql_length, Some(10));
        assert!(!config.logging_enabled);
        assert_eq!(config.no_truncate().max_logged_sql_length, None);
    }
}
