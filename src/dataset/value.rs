//! Values flowing through an interactive pipeline.
//!
//! A [`Value`] is either a scalar, a container ([`Series`], [`Frame`], list),
//! a bound method waiting to be called, or one of the plotting objects.

use super::frame::Frame;
use super::plot::{Axes, Figure, PlotSpec};
use super::series::Series;
use serde_json::Value as JsonValue;
use std::fmt;

/// A method looked up on a value but not yet called, e.g. `series.max`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundMethod {
    /// The value the method was looked up on
    pub receiver: Box<Value>,
    /// Method name, `plot.<kind>` for plot accessor kinds
    pub name: String,
}

impl BoundMethod {
    pub fn new(receiver: Value, name: impl Into<String>) -> Self {
        Self {
            receiver: Box::new(receiver),
            name: name.into(),
        }
    }
}

/// Represents a value produced by a data operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A missing value
    Null,
    /// A boolean value
    Boolean(bool),
    /// A numeric value (floating point)
    Number(f64),
    /// A string value
    String(String),
    /// A plain list of values
    List(Vec<Value>),
    /// A one-dimensional labelled array
    Series(Series),
    /// A table of named, equal-length columns
    Frame(Frame),
    /// A method bound to its receiver
    Method(BoundMethod),
    /// A declarative plot produced by `hvplot`
    Plot(PlotSpec),
    /// Axes drawn on by `plot`
    Axes(Axes),
    /// A figure holding axes
    Figure(Figure),
}

impl Value {
    /// Name of the value's type as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NoneType",
            Value::Boolean(_) => "bool",
            Value::Number(_) => "float",
            Value::String(_) => "str",
            Value::List(_) => "list",
            Value::Series(_) => "Series",
            Value::Frame(_) => "DataFrame",
            Value::Method(_) => "method",
            Value::Plot(_) => "Plot",
            Value::Axes(_) => "Axes",
            Value::Figure(_) => "Figure",
        }
    }

    /// Returns true for null, boolean, number and string values.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integral view of a number, rejecting fractional values.
    pub fn as_i64(&self) -> Option<i64> {
        match self.as_f64() {
            Some(n) if n.fract() == 0.0 && n.is_finite() => Some(n as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            Value::Series(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Value::Frame(f) => Some(f),
            _ => None,
        }
    }

    /// Truthiness of a scalar. Containers have no single truth value.
    pub fn truthy(&self) -> Option<bool> {
        match self {
            Value::Null => Some(false),
            Value::Boolean(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0 && !n.is_nan()),
            Value::String(s) => Some(!s.is_empty()),
            Value::List(items) => Some(!items.is_empty()),
            _ => None,
        }
    }

    /// Drops row labels, renumbering rows from zero.
    pub fn reset_index(self) -> Value {
        match self {
            Value::Series(s) => Value::Series(s.reset_index()),
            Value::Frame(f) => Value::Frame(f.reset_index()),
            other => other,
        }
    }

    /// Converts the value to JSON for inspection by a host UI.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Series(s) => s.to_json(),
            Value::Frame(f) => f.to_json(),
            Value::Method(m) => JsonValue::String(format!("<method {}>", m.name)),
            Value::Plot(p) => p.to_json(),
            Value::Axes(a) => a.to_json(),
            Value::Figure(f) => f.to_json(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Series(s) => write!(f, "{}", s),
            Value::Frame(frame) => write!(f, "{}", frame),
            Value::Method(m) => write!(f, "<bound method {} of {}>", m.name, m.receiver.type_name()),
            Value::Plot(p) => write!(f, "<{} plot>", p.kind),
            Value::Axes(_) => write!(f, "<Axes>"),
            Value::Figure(_) => write!(f, "<Figure>"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Series> for Value {
    fn from(value: Series) -> Self {
        Value::Series(value)
    }
}

impl From<Frame> for Value {
    fn from(value: Frame) -> Self {
        Value::Frame(value)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(b),
            JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                // Objects become single-row frames; a malformed one falls back to a list of pairs.
                let columns: Vec<(String, Vec<Value>)> = map
                    .into_iter()
                    .map(|(k, v)| (k, vec![Value::from(v)]))
                    .collect();
                match Frame::new(columns.clone()) {
                    Ok(frame) => Value::Frame(frame),
                    Err(_) => Value::List(
                        columns
                            .into_iter()
                            .map(|(k, v)| Value::List(vec![Value::String(k), Value::List(v)]))
                            .collect(),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion() {
        assert_eq!(Value::from(json!(1.5)), Value::Number(1.5));
        assert_eq!(Value::from(json!("a")), Value::String("a".into()));
        assert_eq!(
            Value::from(json!([true, null])),
            Value::List(vec![Value::Boolean(true), Value::Null])
        );
        assert_eq!(Value::Number(2.0).to_json(), json!(2.0));
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(Value::Number(0.0).truthy(), Some(false));
        assert_eq!(Value::String("x".into()).truthy(), Some(true));
        assert_eq!(Value::Series(Series::unnamed(vec![])).truthy(), None);
    }

    #[test]
    fn test_display_matches_python_style() {
        let list = Value::List(vec![Value::Boolean(true), Value::Null, Value::from("a")]);
        assert_eq!(list.to_string(), "[True, None, 'a']");
    }
}
