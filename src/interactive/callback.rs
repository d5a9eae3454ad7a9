//! The render callback of a pipeline.

use super::figure::current_figure;
use super::node::Interactive;
use crate::dataset::{self, ApplyOptions, DataType, Dataset, Figure, Frame, Value};
use crate::kwargs::Kwargs;
use crate::reactive::ReactiveFunction;
use log::info;
use serde_json::{json, Map, Value as JsonValue};

/// A frame shown as a table, capped at `max_rows` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePane {
    pub frame: Frame,
    pub max_rows: usize,
    pub options: Kwargs<Value>,
}

impl TablePane {
    /// The rows actually shown.
    pub fn visible(&self) -> Frame {
        self.frame.head(self.max_rows)
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "type": "table",
            "max_rows": self.max_rows,
            "total_rows": self.frame.n_rows(),
            "data": self.visible().to_json(),
            "options": options_json(&self.options),
        })
    }
}

/// What one run of the callback produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// The figure drawn by the last `plot` call, if one ran
    Figure(Option<Figure>),
    Table(TablePane),
    Value(Value),
}

impl Rendered {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Rendered::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TablePane> {
        match self {
            Rendered::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            Rendered::Figure(figure) => figure.as_ref(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Rendered::Figure(figure) => json!({
                "type": "figure",
                "figure": figure.as_ref().map(Figure::to_json),
            }),
            Rendered::Table(table) => table.to_json(),
            Rendered::Value(value) => json!({
                "type": "value",
                "value": value.to_json(),
            }),
        }
    }
}

fn options_json(options: &Kwargs<Value>) -> JsonValue {
    let map: Map<String, JsonValue> = options
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_json()))
        .collect();
    JsonValue::Object(map)
}

/// Builds the function that re-evaluates the pipeline from its source.
///
/// The function depends on every parameter of the node, so watchers re-run
/// it whenever one of them changes. Each run reads the source afresh; a named
/// array source rebinds the expression to the array's current name.
pub fn make_callback(node: &Interactive) -> ReactiveFunction<Rendered> {
    let source = node.source.clone();
    let transform = node.transform.clone();
    let pending = node.pending_method.clone();
    let plot = node.options.plot;
    let max_rows = node.options.max_rows;
    let kwargs = node.options.kwargs.clone();

    ReactiveFunction::depends(node.params(), move || {
        let data = Dataset::new(source.value()?);
        let interface = data.interface();
        let transform = match (interface.datatype, interface.name) {
            (DataType::Array, Some(name)) => transform.clone_with_name(name),
            _ => transform.clone(),
        };
        let mut value = data.apply(
            &transform,
            ApplyOptions {
                keep_index: true,
                eager: false,
            },
        )?;
        if let Some(method) = &pending {
            if let Ok(narrowed) = dataset::get_attr(&value, method) {
                value = narrowed;
            }
        }
        info!("📊 Rendered {} as {}", transform, value.type_name());
        if plot {
            return Ok(Rendered::Figure(current_figure()));
        }
        Ok(match value {
            Value::Frame(frame) => Rendered::Table(TablePane {
                frame,
                max_rows,
                options: kwargs.clone(),
            }),
            other => Rendered::Value(other),
        })
    })
}

impl Interactive {
    pub fn callback(&self) -> ReactiveFunction<Rendered> {
        make_callback(self)
    }
}
