//! # Dataset layer
//!
//! In-memory data the interactive pipeline operates on:
//!
//! * `value` - the [`Value`] enum flowing through expressions
//! * `series` / `frame` - labelled one- and two-dimensional data
//! * `ops` - operator semantics with broadcasting
//! * `methods` - the member table behind attribute access and method calls
//! * `plot` - plot kinds, declarative plots and figures

pub mod frame;
pub mod methods;
pub mod ops;
pub mod plot;
pub mod series;
pub mod value;

pub use frame::{Column, Frame};
pub use methods::{call, get_attr, member_doc, members, CallArgs};
pub use plot::{Artist, Axes, Figure, PlotSpec};
pub use series::Series;
pub use value::{BoundMethod, Value};

use crate::error::InteractiveResult;
use crate::transform::{DimExpr, Interpreter};

/// Broad category of the data held by a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// A frame of named columns
    Tabular,
    /// A one-dimensional array
    Array,
    /// Anything else
    Generic,
}

/// Describes how a dataset stores its data.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub datatype: DataType,
    /// Name of the array, for array data
    pub name: Option<String>,
}

/// Options for [`Dataset::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Keep the row labels of the result; otherwise renumber from zero
    pub keep_index: bool,
    /// Force computation of lazily evaluated data. In-memory data is always
    /// computed, so this has no effect here.
    pub eager: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            keep_index: true,
            eager: false,
        }
    }
}

/// A value an expression can be applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data: Value,
}

impl Dataset {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn interface(&self) -> Interface {
        match &self.data {
            Value::Frame(_) => Interface {
                datatype: DataType::Tabular,
                name: None,
            },
            Value::Series(s) => Interface {
                datatype: DataType::Array,
                name: s.name().map(str::to_string),
            },
            _ => Interface {
                datatype: DataType::Generic,
                name: None,
            },
        }
    }

    /// Evaluates `expr` against this dataset.
    pub fn apply(&self, expr: &DimExpr, options: ApplyOptions) -> InteractiveResult<Value> {
        let value = Interpreter::new(self).evaluate(expr)?;
        Ok(if options.keep_index {
            value
        } else {
            value.reset_index()
        })
    }
}
