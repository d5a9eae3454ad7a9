//! Control widgets owning a `value` parameter.

use super::parameter::Parameter;
use crate::dataset::Value;
use crate::error::{InteractiveError, InteractiveResult};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// What kind of control a widget is, with its bounds or options.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    IntSlider { start: i64, end: i64 },
    FloatSlider { start: f64, end: f64 },
    Select { options: Vec<Value> },
    Checkbox,
    TextInput,
}

impl WidgetKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetKind::IntSlider { .. } => "IntSlider",
            WidgetKind::FloatSlider { .. } => "FloatSlider",
            WidgetKind::Select { .. } => "Select",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::TextInput => "TextInput",
        }
    }

    /// Checks that `value` is acceptable for this control.
    pub fn validate(&self, value: &Value) -> InteractiveResult<()> {
        let ok = match self {
            WidgetKind::IntSlider { start, end } => value
                .as_i64()
                .map(|v| (*start..=*end).contains(&v))
                .unwrap_or(false),
            WidgetKind::FloatSlider { start, end } => matches!(value, Value::Number(_))
                && value.as_f64().map(|v| v >= *start && v <= *end).unwrap_or(false),
            WidgetKind::Select { options } => options.contains(value),
            WidgetKind::Checkbox => matches!(value, Value::Boolean(_)),
            WidgetKind::TextInput => matches!(value, Value::String(_)),
        };
        if ok {
            Ok(())
        } else {
            Err(InteractiveError::invalid_argument_named(
                format!("{} is not a valid value for {}", value, self.type_name()),
                "value",
            ))
        }
    }
}

pub(crate) struct WidgetInner {
    id: Uuid,
    name: String,
    kind: WidgetKind,
    value: Parameter,
}

/// A user-interface control. Its `value` parameter is owned by the widget.
///
/// Clones refer to the same control; equality is identity.
#[derive(Clone)]
pub struct Widget(Rc<WidgetInner>);

impl Widget {
    /// Creates a widget after validating the initial value.
    pub fn new(name: impl Into<String>, kind: WidgetKind, value: impl Into<Value>) -> InteractiveResult<Self> {
        let name = name.into();
        let value = value.into();
        kind.validate(&value)?;
        Ok(Self(Rc::new_cyclic(|owner| WidgetInner {
            id: Uuid::new_v4(),
            value: Parameter::owned_by(name.clone(), value, owner.clone()),
            name,
            kind,
        })))
    }

    pub fn int_slider(name: impl Into<String>, start: i64, end: i64, value: i64) -> InteractiveResult<Self> {
        Self::new(name, WidgetKind::IntSlider { start, end }, value)
    }

    pub fn float_slider(name: impl Into<String>, start: f64, end: f64, value: f64) -> InteractiveResult<Self> {
        Self::new(name, WidgetKind::FloatSlider { start, end }, value)
    }

    pub fn select(name: impl Into<String>, options: Vec<Value>, value: impl Into<Value>) -> InteractiveResult<Self> {
        Self::new(name, WidgetKind::Select { options }, value)
    }

    pub fn checkbox(name: impl Into<String>, value: bool) -> InteractiveResult<Self> {
        Self::new(name, WidgetKind::Checkbox, value)
    }

    pub fn text_input(name: impl Into<String>, value: impl Into<String>) -> InteractiveResult<Self> {
        Self::new(name, WidgetKind::TextInput, Value::String(value.into()))
    }

    pub(crate) fn from_inner(inner: Rc<WidgetInner>) -> Self {
        Self(inner)
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.0.kind
    }

    /// The parameter holding the widget's value.
    pub fn param(&self) -> Parameter {
        self.0.value.clone()
    }

    pub fn value(&self) -> Value {
        self.0.value.get()
    }

    /// Sets the value, as a user moving the control would.
    pub fn set_value(&self, value: impl Into<Value>) -> InteractiveResult<()> {
        let value = value.into();
        self.0.kind.validate(&value)?;
        self.0.value.set(value);
        Ok(())
    }

    pub fn ptr_eq(&self, other: &Widget) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.0.id.to_string(),
            "name": self.0.name,
            "type": self.0.kind.type_name(),
            "value": self.value().to_json(),
        })
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("kind", &self.0.kind.type_name())
            .finish()
    }
}

/// An ordered group of widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetBox(Vec<Widget>);

impl WidgetBox {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self(widgets)
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|w| w.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parameter_is_owned() {
        let w = Widget::int_slider("n", 0, 10, 3).unwrap();
        let owner = w.param().owner().expect("slider owns its value");
        assert!(owner.ptr_eq(&w));
    }

    #[test]
    fn test_set_value_validates() {
        let w = Widget::int_slider("n", 0, 10, 3).unwrap();
        assert!(w.set_value(11).is_err());
        assert!(w.set_value(2.5).is_err());
        w.set_value(7).unwrap();
        assert_eq!(w.value(), Value::from(7));
    }

    #[test]
    fn test_select_options() {
        let w = Widget::select("col", vec!["A".into(), "B".into()], "A").unwrap();
        assert!(w.set_value("C").is_err());
        assert!(Widget::select("col", vec!["A".into()], "Z").is_err());
    }
}
