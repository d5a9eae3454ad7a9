//! # Transform System
//!
//! Symbolic expressions recorded by interactive pipelines and the interpreter
//! that replays them.
//!
//! ## Components
//!
//! * `ast` - expression tree: roots, operations, arguments and operators
//! * `interpreter` - evaluates an expression against a dataset
//!
//! ## Architecture
//!
//! An expression never touches data while it is being built. Each operation on
//! an interactive pipeline clones the current [`DimExpr`] and appends one
//! [`Operation`]. Evaluation happens in [`Interpreter::evaluate`], which reads
//! reactive arguments (parameters, widgets, functions) at that moment, so the
//! same expression follows the controls it was built from.

pub mod ast;
pub mod interpreter;

pub use ast::{Arg, BinaryOp, DimExpr, DimRoot, OpKind, Operation, Ufunc, UnaryOp};
pub use interpreter::Interpreter;
