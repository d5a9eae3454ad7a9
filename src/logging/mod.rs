//! # Logging
//!
//! Sets up `env_logger` from a [`LoggingConfig`]. The crate itself only uses
//! the `log` macros; initialization is up to the application and happens at
//! most once per process.

use crate::config::LoggingConfig;
use crate::error::{InteractiveError, InteractiveResult};
use log::LevelFilter;
use once_cell::sync::OnceCell;

static LOGGING_CONFIG: OnceCell<LoggingConfig> = OnceCell::new();

pub struct LoggingSystem;

impl LoggingSystem {
    /// Initializes logging with the default configuration.
    pub fn init_default() -> InteractiveResult<()> {
        Self::init_with_config(&LoggingConfig::default())
    }

    /// Initializes logging. Fails when logging was already initialized.
    ///
    /// The configuration is recorded only once the logger is installed, so a
    /// rejected configuration can be corrected and retried.
    pub fn init_with_config(config: &LoggingConfig) -> InteractiveResult<()> {
        if Self::is_initialized() {
            return Err(InteractiveError::configuration("Logging system already initialized"));
        }

        let mut builder = env_logger::Builder::new();
        builder.filter_level(level_filter(&config.level)?);
        for (module, level) in &config.features {
            builder.filter_module(module, level_filter(level)?);
        }
        builder.write_style(if config.enable_colors {
            env_logger::WriteStyle::Auto
        } else {
            env_logger::WriteStyle::Never
        });
        builder
            .try_init()
            .map_err(|e| InteractiveError::configuration(format!("Failed to install logger: {}", e)))?;
        LOGGING_CONFIG
            .set(config.clone())
            .map_err(|_| InteractiveError::configuration("Logging system already initialized"))?;
        log::info!("📝 Logging initialized at {}", config.level);
        Ok(())
    }

    pub fn is_initialized() -> bool {
        LOGGING_CONFIG.get().is_some()
    }

    /// The configuration logging was initialized with.
    pub fn config() -> Option<&'static LoggingConfig> {
        LOGGING_CONFIG.get()
    }
}

/// Maps a level name to a filter, case-insensitively.
pub fn level_filter(level: &str) -> InteractiveResult<LevelFilter> {
    match level.to_uppercase().as_str() {
        "TRACE" => Ok(LevelFilter::Trace),
        "DEBUG" => Ok(LevelFilter::Debug),
        "INFO" => Ok(LevelFilter::Info),
        "WARN" => Ok(LevelFilter::Warn),
        "ERROR" => Ok(LevelFilter::Error),
        "OFF" => Ok(LevelFilter::Off),
        _ => Err(InteractiveError::configuration_with_key(
            format!("Invalid log level: {}", level),
            "logging.level",
            "Use TRACE, DEBUG, INFO, WARN, ERROR or OFF",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(level_filter("WARN").unwrap(), LevelFilter::Warn);
        assert!(level_filter("loud").is_err());
    }

    #[test]
    fn test_rejected_config_can_be_retried() {
        let loud = LoggingConfig {
            level: "LOUD".to_string(),
            ..LoggingConfig::default()
        };
        assert!(LoggingSystem::init_with_config(&loud).is_err());
        assert!(!LoggingSystem::is_initialized());

        let mut bad_feature = LoggingConfig::default();
        bad_feature
            .features
            .insert("interactive_pipeline".to_string(), "chatty".to_string());
        assert!(LoggingSystem::init_with_config(&bad_feature).is_err());
        assert!(!LoggingSystem::is_initialized());

        let quiet = LoggingConfig {
            level: "ERROR".to_string(),
            ..LoggingConfig::default()
        };
        LoggingSystem::init_with_config(&quiet).unwrap();
        assert!(LoggingSystem::is_initialized());
        assert_eq!(LoggingSystem::config().map(|c| c.level.as_str()), Some("ERROR"));
        assert!(LoggingSystem::init_default().is_err());
    }
}
