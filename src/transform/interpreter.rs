//! Interpreter for recorded expressions.
//!
//! Evaluates a [`DimExpr`] against a [`Dataset`] by resolving the root and
//! folding each operation over the running value.

use super::ast::{Arg, DimExpr, DimRoot, OpKind, Operation};
use crate::dataset::{self, ops, CallArgs, Dataset, Value};
use crate::error::{InteractiveError, InteractiveResult};
use crate::kwargs::Kwargs;
use log::trace;

/// Interpreter bound to one dataset snapshot.
pub struct Interpreter<'a> {
    dataset: &'a Dataset,
}

impl<'a> Interpreter<'a> {
    /// Creates a new interpreter.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Evaluates an expression.
    pub fn evaluate(&self, expr: &DimExpr) -> InteractiveResult<Value> {
        let mut current = self.evaluate_root(&expr.root)?;
        for operation in &expr.ops {
            current = self.evaluate_operation(current, operation)?;
        }
        Ok(current)
    }

    fn evaluate_root(&self, root: &DimRoot) -> InteractiveResult<Value> {
        let data = self.dataset.data();
        match root {
            DimRoot::Frame | DimRoot::Generic => Ok(data.clone()),
            DimRoot::Named(name) => match data {
                Value::Series(s) if s.name() == Some(name.as_str()) => Ok(data.clone()),
                Value::Series(s) => Err(InteractiveError::evaluation(
                    format!(
                        "array is named {:?}, expression refers to '{}'",
                        s.name().unwrap_or_default(),
                        name
                    ),
                    "dim",
                )),
                Value::Frame(frame) => frame.column(name).map(Value::Series).ok_or_else(|| {
                    InteractiveError::evaluation(format!("column '{}' not found", name), "dim")
                }),
                other => Ok(other.clone()),
            },
        }
    }

    fn evaluate_operation(&self, current: Value, operation: &Operation) -> InteractiveResult<Value> {
        trace!("applying {:?} to {}", operation.kind, current.type_name());
        match &operation.kind {
            OpKind::Accessor { name, called: false } => dataset::get_attr(&current, name),
            OpKind::Accessor { name, called: true } => {
                let method = dataset::get_attr(&current, name)?;
                let args = self.evaluate_call_args(operation)?;
                dataset::call(&method, &args)
            }
            OpKind::Unary(op) => ops::unary(*op, &current),
            OpKind::Binary { op, reverse } => {
                let other = self.evaluate_arg(single_arg(operation)?)?;
                if *reverse {
                    ops::binary(*op, &other, &current)
                } else {
                    ops::binary(*op, &current, &other)
                }
            }
            OpKind::Index => {
                let key = self.evaluate_arg(single_arg(operation)?)?;
                ops::index(&current, &key)
            }
            OpKind::Ufunc(func) => ops::ufunc(*func, &current),
        }
    }

    fn evaluate_call_args(&self, operation: &Operation) -> InteractiveResult<CallArgs> {
        let args = operation
            .args
            .iter()
            .map(|arg| self.evaluate_arg(arg))
            .collect::<InteractiveResult<Vec<_>>>()?;
        let mut kwargs = Kwargs::new();
        for (key, arg) in operation.kwargs.iter() {
            kwargs.insert(key, self.evaluate_arg(arg)?);
        }
        Ok(CallArgs::new(args, kwargs))
    }

    /// Resolves an argument to its current value.
    pub fn evaluate_arg(&self, arg: &Arg) -> InteractiveResult<Value> {
        match arg {
            Arg::Literal(value) => Ok(value.clone()),
            Arg::Expr(expr) => self.evaluate(expr),
            Arg::Param(param) => Ok(param.get()),
            Arg::Widget(widget) => Ok(widget.value()),
            Arg::Function(function) => function.call(),
            Arg::List(items) => items
                .iter()
                .map(|item| self.evaluate_arg(item))
                .collect::<InteractiveResult<Vec<_>>>()
                .map(Value::List),
        }
    }
}

fn single_arg(operation: &Operation) -> InteractiveResult<&Arg> {
    operation.args.first().ok_or_else(|| {
        InteractiveError::evaluation("operation is missing its operand", format!("{:?}", operation.kind))
    })
}
