//! Display options carried along a pipeline.

use crate::config::InteractiveConfig;
use crate::dataset::Value;
use crate::error::{InteractiveError, InteractiveResult};
use crate::kwargs::Kwargs;
use crate::transform::Arg;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the widgets go relative to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Left,
    Right,
    Top,
    Bottom,
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl Location {
    pub const ALL: [Location; 12] = [
        Location::Left,
        Location::Right,
        Location::Top,
        Location::Bottom,
        Location::TopLeft,
        Location::TopRight,
        Location::BottomLeft,
        Location::BottomRight,
        Location::LeftTop,
        Location::RightTop,
        Location::LeftBottom,
        Location::RightBottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Left => "left",
            Location::Right => "right",
            Location::Top => "top",
            Location::Bottom => "bottom",
            Location::TopLeft => "top_left",
            Location::TopRight => "top_right",
            Location::BottomLeft => "bottom_left",
            Location::BottomRight => "bottom_right",
            Location::LeftTop => "left_top",
            Location::RightTop => "right_top",
            Location::LeftBottom => "left_bottom",
            Location::RightBottom => "right_bottom",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = InteractiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .iter()
            .copied()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Location::ALL.iter().map(Location::as_str).collect();
                InteractiveError::invalid_argument_named(
                    format!("invalid loc '{}', expected one of {}", s, valid.join(", ")),
                    "loc",
                )
            })
    }
}

/// Keys consumed by [`DisplayOptions::updated`] instead of passed through.
pub const RESERVED_KEYS: &[&str] = &["plot", "loc", "center", "dmap", "max_rows"];

/// How a node renders, plus keyword options passed to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// The output is a drawn figure
    pub plot: bool,
    /// Render through a dynamic map rather than a panel
    pub dmap: bool,
    pub loc: Location,
    pub center: bool,
    /// Row cap for table output
    pub max_rows: usize,
    /// Passed through to the output
    pub kwargs: Kwargs<Value>,
    /// Injected into the next method call, e.g. `ax` for `plot`
    pub inherit_kwargs: Kwargs<Arg>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            plot: false,
            dmap: false,
            loc: Location::default(),
            center: false,
            max_rows: 100,
            kwargs: Kwargs::new(),
            inherit_kwargs: Kwargs::new(),
        }
    }
}

impl DisplayOptions {
    /// Defaults taken from the display section of a configuration.
    pub fn from_config(config: &InteractiveConfig) -> Self {
        Self {
            dmap: config.display.dmap,
            loc: config.display.loc,
            center: config.display.center,
            max_rows: config.display.max_rows,
            ..Self::default()
        }
    }

    /// Returns a copy updated from call keywords. Reserved keys must be
    /// literals of the right type; all other keys pass through.
    pub fn updated(&self, kwargs: &Kwargs<Arg>) -> InteractiveResult<Self> {
        let mut options = self.clone();
        for (key, arg) in kwargs.iter() {
            let value = match arg {
                Arg::Literal(value) => value,
                other => {
                    return Err(InteractiveError::invalid_argument_named(
                        format!("display option '{}' must be a plain value, got {}", key, other),
                        key,
                    ))
                }
            };
            match key {
                "plot" => options.plot = expect_bool(key, value)?,
                "center" => options.center = expect_bool(key, value)?,
                "dmap" => options.dmap = expect_bool(key, value)?,
                "loc" => {
                    options.loc = value
                        .as_str()
                        .ok_or_else(|| wrong_type(key, "a string", value))?
                        .parse()?
                }
                "max_rows" => {
                    options.max_rows = value
                        .as_i64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| wrong_type(key, "a non-negative integer", value))?
                }
                _ => {
                    options.kwargs.insert(key, value.clone());
                }
            }
        }
        Ok(options)
    }
}

fn expect_bool(key: &str, value: &Value) -> InteractiveResult<bool> {
    value.as_bool().ok_or_else(|| wrong_type(key, "a boolean", value))
}

fn wrong_type(key: &str, expected: &str, value: &Value) -> InteractiveError {
    InteractiveError::invalid_argument_named(
        format!("'{}' must be {}, got {}", key, expected, value.type_name()),
        key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_round_trip() {
        for loc in Location::ALL {
            assert_eq!(loc.as_str().parse::<Location>().unwrap(), loc);
        }
        assert!("middle".parse::<Location>().is_err());
    }

    #[test]
    fn test_updated_splits_reserved_keys() {
        let kwargs: Kwargs<Arg> = Kwargs::new()
            .with("loc", "left")
            .with("max_rows", 5)
            .with("width", 300);
        let options = DisplayOptions::default().updated(&kwargs).unwrap();
        assert_eq!(options.loc, Location::Left);
        assert_eq!(options.max_rows, 5);
        assert_eq!(options.kwargs.get("width"), Some(&Value::from(300)));
        assert!(!options.kwargs.contains("loc"));
    }

    #[test]
    fn test_updated_rejects_bad_values() {
        let bad_loc: Kwargs<Arg> = Kwargs::new().with("loc", "middle");
        assert!(DisplayOptions::default().updated(&bad_loc).is_err());
        let bad_rows: Kwargs<Arg> = Kwargs::new().with("max_rows", -1);
        assert!(DisplayOptions::default().updated(&bad_rows).is_err());
    }
}
