//! Symbolic expressions recorded by interactive pipelines.
//!
//! A [`DimExpr`] is a root reference to the data plus an ordered list of
//! [`Operation`]s. Expressions are immutable; building on one clones it and
//! appends a node.

use crate::dataset::Value;
use crate::kwargs::Kwargs;
use crate::reactive::{Parameter, ReactiveFunction, Widget};
use std::fmt;

/// Represents a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Xor,
    LShift,
    RShift,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::TrueDiv => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Represents a unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Unary plus (+)
    Pos,
    /// Bitwise or boolean inversion (~)
    Invert,
    /// Logical not
    Not,
    /// Absolute value
    Abs,
    /// Rounding to the given number of decimals
    Round(Option<i32>),
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not",
            UnaryOp::Abs => "abs",
            UnaryOp::Round(_) => "round",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Element-wise numeric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ufunc {
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Floor,
    Ceil,
}

impl Ufunc {
    pub fn name(&self) -> &'static str {
        match self {
            Ufunc::Sqrt => "sqrt",
            Ufunc::Exp => "exp",
            Ufunc::Log => "log",
            Ufunc::Sin => "sin",
            Ufunc::Cos => "cos",
            Ufunc::Floor => "floor",
            Ufunc::Ceil => "ceil",
        }
    }

    pub fn from_name(name: &str) -> Option<Ufunc> {
        Some(match name {
            "sqrt" => Ufunc::Sqrt,
            "exp" => Ufunc::Exp,
            "log" => Ufunc::Log,
            "sin" => Ufunc::Sin,
            "cos" => Ufunc::Cos,
            "floor" => Ufunc::Floor,
            "ceil" => Ufunc::Ceil,
            _ => return None,
        })
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Ufunc::Sqrt => x.sqrt(),
            Ufunc::Exp => x.exp(),
            Ufunc::Log => x.ln(),
            Ufunc::Sin => x.sin(),
            Ufunc::Cos => x.cos(),
            Ufunc::Floor => x.floor(),
            Ufunc::Ceil => x.ceil(),
        }
    }
}

/// What the expression's root refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum DimRoot {
    /// The whole frame
    Frame,
    /// A named array, or the named column of a frame
    Named(String),
    /// Any other value, as is
    Generic,
}

/// An argument recorded in an operation.
#[derive(Clone)]
pub enum Arg {
    /// A plain value
    Literal(Value),
    /// A sub-expression applied to the same dataset
    Expr(DimExpr),
    /// A parameter, read at apply time
    Param(Parameter),
    /// A widget, resolving to its current value
    Widget(Widget),
    /// A zero-argument reactive function, called at apply time
    Function(ReactiveFunction<Value>),
    /// A list of arguments
    List(Vec<Arg>),
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Literal(a), Arg::Literal(b)) => a == b,
            (Arg::Expr(a), Arg::Expr(b)) => a == b,
            (Arg::Param(a), Arg::Param(b)) => a.ptr_eq(b),
            (Arg::Widget(a), Arg::Widget(b)) => a.ptr_eq(b),
            (Arg::Function(a), Arg::Function(b)) => a.ptr_eq(b),
            (Arg::List(a), Arg::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Literal(v) => write!(f, "{}", v),
            Arg::Expr(e) => write!(f, "{}", e),
            Arg::Param(p) => write!(f, "param('{}')", p.name()),
            Arg::Widget(w) => write!(f, "widget('{}')", w.name()),
            Arg::Function(_) => write!(f, "<function>"),
            Arg::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! arg_from_literal {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Arg::Literal(Value::from(value))
            }
        })*
    };
}

arg_from_literal!(f64, i64, i32, usize, bool, &str, String);

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Literal(value)
    }
}

impl From<DimExpr> for Arg {
    fn from(expr: DimExpr) -> Self {
        Arg::Expr(expr)
    }
}

impl From<Parameter> for Arg {
    fn from(param: Parameter) -> Self {
        Arg::Param(param)
    }
}

impl From<&Parameter> for Arg {
    fn from(param: &Parameter) -> Self {
        Arg::Param(param.clone())
    }
}

impl From<Widget> for Arg {
    fn from(widget: Widget) -> Self {
        Arg::Widget(widget)
    }
}

impl From<&Widget> for Arg {
    fn from(widget: &Widget) -> Self {
        Arg::Widget(widget.clone())
    }
}

impl From<ReactiveFunction<Value>> for Arg {
    fn from(function: ReactiveFunction<Value>) -> Self {
        Arg::Function(function)
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(items: Vec<Arg>) -> Self {
        Arg::List(items)
    }
}

/// The kind of an operation node.
#[derive(Debug, Clone, PartialEq)]
pub enum OpKind {
    /// Attribute access, optionally called with the operation's arguments
    Accessor { name: String, called: bool },
    Unary(UnaryOp),
    /// Binary operator; `reverse` puts the argument on the left
    Binary { op: BinaryOp, reverse: bool },
    /// Indexing with the single argument
    Index,
    Ufunc(Ufunc),
}

/// One recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OpKind,
    pub args: Vec<Arg>,
    pub kwargs: Kwargs<Arg>,
}

impl Operation {
    fn new(kind: OpKind, args: Vec<Arg>, kwargs: Kwargs<Arg>) -> Self {
        Self { kind, args, kwargs }
    }

    /// Every argument, positional first, then keyword arguments with their names.
    pub fn all_args(&self) -> impl Iterator<Item = (Option<&str>, &Arg)> {
        self.args
            .iter()
            .map(|a| (None, a))
            .chain(self.kwargs.iter().map(|(k, a)| (Some(k), a)))
    }
}

/// A symbolic expression over a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DimExpr {
    pub root: DimRoot,
    pub ops: Vec<Operation>,
}

impl DimExpr {
    pub fn new(root: DimRoot) -> Self {
        Self {
            root,
            ops: Vec::new(),
        }
    }

    /// Identity expression over a whole frame.
    pub fn frame() -> Self {
        Self::new(DimRoot::Frame)
    }

    /// Identity expression over a named array.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(DimRoot::Named(name.into()))
    }

    /// Identity expression over any value.
    pub fn generic() -> Self {
        Self::new(DimRoot::Generic)
    }

    fn push(&self, operation: Operation) -> Self {
        let mut expr = self.clone();
        expr.ops.push(operation);
        expr
    }

    /// `expr.name`
    pub fn accessor(&self, name: impl Into<String>) -> Self {
        self.push(Operation::new(
            OpKind::Accessor {
                name: name.into(),
                called: false,
            },
            Vec::new(),
            Kwargs::new(),
        ))
    }

    /// `expr.name(*args, **kwargs)`
    pub fn call_accessor(&self, name: impl Into<String>, args: Vec<Arg>, kwargs: Kwargs<Arg>) -> Self {
        self.push(Operation::new(
            OpKind::Accessor {
                name: name.into(),
                called: true,
            },
            args,
            kwargs,
        ))
    }

    pub fn unary(&self, op: UnaryOp) -> Self {
        self.push(Operation::new(OpKind::Unary(op), Vec::new(), Kwargs::new()))
    }

    /// `expr <op> other`, or `other <op> expr` when `reverse` is set.
    pub fn binary(&self, op: BinaryOp, other: impl Into<Arg>, reverse: bool) -> Self {
        self.push(Operation::new(
            OpKind::Binary { op, reverse },
            vec![other.into()],
            Kwargs::new(),
        ))
    }

    /// `expr[key]`
    pub fn index(&self, key: impl Into<Arg>) -> Self {
        self.push(Operation::new(OpKind::Index, vec![key.into()], Kwargs::new()))
    }

    pub fn ufunc(&self, func: Ufunc) -> Self {
        self.push(Operation::new(OpKind::Ufunc(func), Vec::new(), Kwargs::new()))
    }

    /// The same operations rooted at the array called `name`.
    pub fn clone_with_name(&self, name: impl Into<String>) -> Self {
        Self {
            root: DimRoot::Named(name.into()),
            ops: self.ops.clone(),
        }
    }

    /// Free reactive parameters, keyed by parameter name or by the keyword
    /// they were passed under. Sub-expressions are searched too.
    pub fn params(&self) -> Vec<(String, Parameter)> {
        let mut found = Vec::new();
        for operation in &self.ops {
            for (keyword, arg) in operation.all_args() {
                collect_params(keyword, arg, &mut found);
            }
        }
        found
    }
}

fn collect_params(keyword: Option<&str>, arg: &Arg, found: &mut Vec<(String, Parameter)>) {
    match arg {
        Arg::Literal(_) => {}
        Arg::Param(p) => found.push((keyword.unwrap_or(p.name()).to_string(), p.clone())),
        Arg::Widget(w) => found.push((keyword.unwrap_or(w.name()).to_string(), w.param())),
        Arg::Function(func) => {
            for p in func.dependencies() {
                found.push((keyword.unwrap_or(p.name()).to_string(), p.clone()));
            }
        }
        Arg::Expr(expr) => found.extend(expr.params()),
        Arg::List(items) => {
            for item in items {
                collect_params(keyword, item, found);
            }
        }
    }
}

impl fmt::Display for DimExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = match &self.root {
            DimRoot::Frame => "df_dim('*')".to_string(),
            DimRoot::Named(name) => format!("xr_dim('{}')", name),
            DimRoot::Generic => "dim('*')".to_string(),
        };
        for operation in &self.ops {
            out = match &operation.kind {
                OpKind::Accessor { name, called: false } => format!("{}.{}", out, name),
                OpKind::Accessor { name, called: true } => {
                    let args: Vec<String> = operation
                        .all_args()
                        .map(|(k, a)| match k {
                            Some(k) => format!("{}={}", k, a),
                            None => a.to_string(),
                        })
                        .collect();
                    format!("{}.{}({})", out, name, args.join(", "))
                }
                OpKind::Unary(UnaryOp::Abs) => format!("abs({})", out),
                OpKind::Unary(UnaryOp::Round(Some(n))) => format!("round({}, {})", out, n),
                OpKind::Unary(UnaryOp::Round(None)) => format!("round({})", out),
                OpKind::Unary(UnaryOp::Not) => format!("not {}", out),
                OpKind::Unary(op) => format!("{}{}", op, out),
                OpKind::Binary { op, reverse } => {
                    let other = operation.args.first().map(Arg::to_string).unwrap_or_default();
                    if *reverse {
                        format!("({} {} {})", other, op, out)
                    } else {
                        format!("({} {} {})", out, op, other)
                    }
                }
                OpKind::Index => {
                    let key = operation.args.first().map(Arg::to_string).unwrap_or_default();
                    format!("{}[{}]", out, key)
                }
                OpKind::Ufunc(func) => format!("{}({})", func.name(), out),
            };
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let expr = DimExpr::frame()
            .accessor("A")
            .binary(BinaryOp::Gt, 1, false)
            .unary(UnaryOp::Neg);
        assert_eq!(expr.to_string(), "-(df_dim('*').A > 1)");
        let reflected = DimExpr::named("x").binary(BinaryOp::Sub, 2, true);
        assert_eq!(reflected.to_string(), "(2 - xr_dim('x'))");
    }

    #[test]
    fn test_expressions_are_immutable() {
        let base = DimExpr::frame();
        let extended = base.accessor("A");
        assert!(base.ops.is_empty());
        assert_eq!(extended.ops.len(), 1);
    }

    #[test]
    fn test_params_keyed_by_keyword() {
        let p = Parameter::new("n", 3);
        let f = ReactiveFunction::depends(vec![p.clone()], || Ok(Value::Null));
        let expr = DimExpr::frame().call_accessor(
            "head",
            vec![Arg::from(&p)],
            Kwargs::new().with("ax", Arg::Function(f)),
        );
        let params = expr.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].0, "n");
        assert_eq!(params[1].0, "ax");
        assert!(params[1].1.ptr_eq(&p));
    }

    #[test]
    fn test_clone_with_name() {
        let expr = DimExpr::generic().accessor("max").clone_with_name("x");
        assert_eq!(expr.root, DimRoot::Named("x".into()));
        assert_eq!(expr.ops.len(), 1);
    }
}
