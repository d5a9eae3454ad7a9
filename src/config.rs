//! Configuration for interactive pipelines.
//!
//! Settings are read from a TOML file, then overridden by environment
//! variables:
//!
//! * `INTERACTIVE_MAX_ROWS` - row cap for table output
//! * `INTERACTIVE_LOC` - default widget location
//! * `INTERACTIVE_CENTER` - center the output
//! * `INTERACTIVE_DMAP` - render through a dynamic map
//! * `INTERACTIVE_LOG_LEVEL` - default log level
//! * `INTERACTIVE_LOG_FEATURE_<MODULE>` - log level for one module

use crate::error::{InteractiveError, InteractiveResult};
use crate::interactive::Location;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const LOG_LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "OFF"];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveConfig {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Default display options for new pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Row cap for table output
    pub max_rows: usize,
    /// Where widgets go relative to the output
    pub loc: Location,
    /// Center the output between spacers
    pub center: bool,
    /// Render through a dynamic map rather than a panel
    pub dmap: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 100,
            loc: Location::TopLeft,
            center: false,
            dmap: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for all modules
    pub level: String,
    /// Enable colored output
    pub enable_colors: bool,
    /// Per-module log levels, keyed by module path
    pub features: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            enable_colors: true,
            features: HashMap::new(),
        }
    }
}

impl InteractiveConfig {
    /// Loads configuration from a TOML file without environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> InteractiveResult<Self> {
        let path = path.as_ref();
        debug!("Loading interactive config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> InteractiveResult<Self> {
        let config: InteractiveConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file when it exists, falls back to defaults otherwise, then
    /// applies environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> InteractiveResult<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> InteractiveResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> InteractiveResult<()> {
        self.apply_overrides(std::env::vars())
    }

    /// Applies `INTERACTIVE_*` overrides from `vars`.
    pub fn apply_overrides<I>(&mut self, vars: I) -> InteractiveResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "INTERACTIVE_MAX_ROWS" => {
                    self.display.max_rows = value.parse().map_err(|_| {
                        InteractiveError::configuration_with_key(
                            format!("invalid row cap '{}'", value),
                            "display.max_rows",
                            "Use a non-negative integer",
                        )
                    })?;
                }
                "INTERACTIVE_LOC" => {
                    self.display.loc = value.parse().map_err(|_| {
                        InteractiveError::configuration_with_key(
                            format!("invalid widget location '{}'", value),
                            "display.loc",
                            "Use a location such as 'left' or 'top_right'",
                        )
                    })?;
                }
                "INTERACTIVE_CENTER" => self.display.center = parse_flag(&key, &value)?,
                "INTERACTIVE_DMAP" => self.display.dmap = parse_flag(&key, &value)?,
                "INTERACTIVE_LOG_LEVEL" => self.logging.level = value.to_uppercase(),
                _ => {
                    if let Some(feature) = key.strip_prefix("INTERACTIVE_LOG_FEATURE_") {
                        self.logging
                            .features
                            .insert(feature.to_lowercase(), value.to_uppercase());
                    }
                }
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> InteractiveResult<()> {
        validate_level("logging.level", &self.logging.level)?;
        for (feature, level) in &self.logging.features {
            validate_level(&format!("logging.features.{}", feature), level)?;
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> InteractiveResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> InteractiveResult<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> InteractiveResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InteractiveError::configuration_with_key(
            format!("invalid boolean '{}'", value),
            key,
            "Use true or false",
        )),
    }
}

fn validate_level(key: &str, level: &str) -> InteractiveResult<()> {
    if LOG_LEVELS.contains(&level.to_uppercase().as_str()) {
        Ok(())
    } else {
        Err(InteractiveError::configuration_with_key(
            format!("unknown log level '{}'", level),
            key,
            format!("Use one of {}", LOG_LEVELS.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = InteractiveConfig::default();
        assert_eq!(config.display.max_rows, 100);
        assert_eq!(config.display.loc, Location::TopLeft);
        assert_eq!(config.logging.level, "INFO");
    }

    #[test]
    fn test_partial_toml() {
        let config = InteractiveConfig::from_toml_str(
            r#"
            [display]
            loc = "right_bottom"
            center = true
            "#,
        )
        .unwrap();
        assert_eq!(config.display.loc, Location::RightBottom);
        assert!(config.display.center);
        assert_eq!(config.display.max_rows, 100);
    }

    #[test]
    fn test_overrides() {
        let mut config = InteractiveConfig::default();
        config
            .apply_overrides(vars(&[
                ("INTERACTIVE_MAX_ROWS", "7"),
                ("INTERACTIVE_LOC", "bottom"),
                ("INTERACTIVE_DMAP", "yes"),
                ("INTERACTIVE_LOG_FEATURE_INTERACTIVE_PIPELINE", "debug"),
                ("UNRELATED", "x"),
            ]))
            .unwrap();
        assert_eq!(config.display.max_rows, 7);
        assert_eq!(config.display.loc, Location::Bottom);
        assert!(config.display.dmap);
        assert_eq!(
            config.logging.features.get("interactive_pipeline").map(String::as_str),
            Some("DEBUG")
        );
    }

    #[test]
    fn test_bad_override_names_key() {
        let mut config = InteractiveConfig::default();
        let err = config
            .apply_overrides(vars(&[("INTERACTIVE_LOC", "middle")]))
            .unwrap_err();
        match err {
            InteractiveError::Configuration { config_key, .. } => {
                assert_eq!(config_key.as_deref(), Some("display.loc"))
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(InteractiveConfig::from_toml_str("[logging]\nlevel = \"LOUD\"").is_err());
    }
}
