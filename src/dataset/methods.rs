//! Member dispatch for values.
//!
//! Each value type has a static table of [`MemberSpec`]s. Properties are
//! evaluated on lookup; methods are returned bound to their receiver and run
//! when called with [`call`].

use super::frame::Frame;
use super::ops::{self, reduce_frame};
use super::plot::{self, Artist, Figure, PlotSpec};
use super::series::Series;
use super::value::{BoundMethod, Value};
use crate::error::{InteractiveError, InteractiveResult};
use crate::kwargs::Kwargs;
use crate::transform::ast::{BinaryOp, UnaryOp};
use log::trace;

/// Positional and keyword arguments of a data-level call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub args: Vec<Value>,
    pub kwargs: Kwargs<Value>,
}

impl CallArgs {
    pub fn new(args: Vec<Value>, kwargs: Kwargs<Value>) -> Self {
        Self { args, kwargs }
    }

    /// The argument at `position`, or the keyword `name`.
    pub fn get(&self, position: usize, name: &str) -> Option<&Value> {
        self.args
            .get(position)
            .or_else(|| self.kwargs.get(name))
            .filter(|v| !v.is_null())
    }

    fn usize_or(&self, position: usize, name: &str, default: usize) -> InteractiveResult<usize> {
        match self.get(position, name) {
            None => Ok(default),
            Some(v) => v
                .as_i64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| type_error(name, "a non-negative integer", v)),
        }
    }

    fn bool_or(&self, position: usize, name: &str, default: bool) -> InteractiveResult<bool> {
        match self.get(position, name) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| type_error(name, "a boolean", v)),
        }
    }

    fn string(&self, position: usize, name: &str) -> InteractiveResult<String> {
        match self.get(position, name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(v) => Err(type_error(name, "a string", v)),
            None => Err(InteractiveError::invalid_argument_named(
                format!("missing required argument '{}'", name),
                name,
            )),
        }
    }

    fn required(&self, position: usize, name: &str) -> InteractiveResult<&Value> {
        self.get(position, name).ok_or_else(|| {
            InteractiveError::invalid_argument_named(format!("missing required argument '{}'", name), name)
        })
    }
}

fn type_error(name: &str, expected: &str, got: &Value) -> InteractiveError {
    InteractiveError::invalid_argument_named(
        format!("'{}' must be {}, got {}", name, expected, got.type_name()),
        name,
    )
}

/// Function implementing a member.
pub type MemberFn = fn(&Value, &CallArgs) -> InteractiveResult<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
}

/// A member available on a value type.
pub struct MemberSpec {
    pub name: &'static str,
    pub kind: MemberKind,
    pub doc: &'static str,
    pub func: MemberFn,
}

const fn property(name: &'static str, doc: &'static str, func: MemberFn) -> MemberSpec {
    MemberSpec {
        name,
        kind: MemberKind::Property,
        doc,
        func,
    }
}

const fn method(name: &'static str, doc: &'static str, func: MemberFn) -> MemberSpec {
    MemberSpec {
        name,
        kind: MemberKind::Method,
        doc,
        func,
    }
}

static FRAME_MEMBERS: &[MemberSpec] = &[
    property("columns", "The column labels of the DataFrame.", frame_columns),
    property("shape", "Tuple of (rows, columns).", shape),
    property("empty", "Whether the DataFrame has no rows or no columns.", empty),
    property("index", "The row labels of the DataFrame.", index_labels),
    property("size", "Number of cells.", size),
    method("head", "Return the first `n` rows.", head),
    method("tail", "Return the last `n` rows.", tail),
    method("max", "Return the maximum of each column.", max),
    method("min", "Return the minimum of each column.", min),
    method("sum", "Return the sum of each column.", sum),
    method("mean", "Return the mean of each column.", mean),
    method("count", "Count non-null cells for each column.", count),
    method("abs", "Return a DataFrame with absolute numeric values.", abs),
    method("round", "Round to a number of decimal places.", round),
    method("sort_values", "Sort rows by the values of column `by`.", frame_sort_values),
    method("reset_index", "Reset the row labels to 0..n.", reset_index),
    method("drop", "Drop the named columns.", frame_drop),
    method("hvplot", "Declare a plot of the data, `kind` selects the plot type.", hvplot),
    method("plot", "Draw the data on matplotlib-style axes.", draw_plot),
];

static SERIES_MEMBERS: &[MemberSpec] = &[
    property("name", "The name of the Series.", series_name),
    property("shape", "Tuple of (rows,).", shape),
    property("empty", "Whether the Series is empty.", empty),
    property("index", "The row labels of the Series.", index_labels),
    property("values", "The values of the Series as a list.", series_values),
    property("size", "Number of elements.", size),
    method("head", "Return the first `n` rows.", head),
    method("tail", "Return the last `n` rows.", tail),
    method("max", "Return the maximum of the values.", max),
    method("min", "Return the minimum of the values.", min),
    method("sum", "Return the sum of the values.", sum),
    method("mean", "Return the mean of the values.", mean),
    method("count", "Count non-null values.", count),
    method("abs", "Return a Series with absolute numeric values.", abs),
    method("round", "Round to a number of decimal places.", round),
    method("cumsum", "Return the cumulative sum.", cumsum),
    method("unique", "Return unique values in order of appearance.", unique),
    method("sort_values", "Sort by the values.", series_sort_values),
    method("reset_index", "Reset the row labels to 0..n.", reset_index),
    method("to_list", "Return the values as a list.", series_values),
    method("isin", "Whether each element is contained in `values`.", isin),
    method("between", "Whether each element is between `left` and `right` inclusive.", between),
    method("hvplot", "Declare a plot of the data, `kind` selects the plot type.", hvplot),
    method("plot", "Draw the data on matplotlib-style axes.", draw_plot),
];

static NUMBER_MEMBERS: &[MemberSpec] = &[
    property("real", "The real part of the number.", number_real),
    property("imag", "The imaginary part of the number.", number_imag),
    method("conjugate", "Return the complex conjugate.", number_real),
    method("is_integer", "Return True if the number is integral.", number_is_integer),
];

static STRING_MEMBERS: &[MemberSpec] = &[
    method("upper", "Return a copy converted to uppercase.", str_upper),
    method("lower", "Return a copy converted to lowercase.", str_lower),
    method("strip", "Return a copy with surrounding whitespace removed.", str_strip),
    method("title", "Return a titlecased copy.", str_title),
    method("startswith", "Return True if the string starts with `prefix`.", str_startswith),
    method("endswith", "Return True if the string ends with `suffix`.", str_endswith),
    method("split", "Split on `sep`, or on whitespace.", str_split),
    method("replace", "Replace occurrences of `old` with `new`.", str_replace),
];

static LIST_MEMBERS: &[MemberSpec] = &[
    method("count", "Return the number of occurrences of `value`.", list_count),
    method("index", "Return the first position of `value`.", list_index),
];

static PLOT_MEMBERS: &[MemberSpec] = &[
    property("kind", "The plot kind.", plot_kind),
    method("opts", "Return a copy with updated plot options.", plot_opts),
];

static AXES_MEMBERS: &[MemberSpec] = &[
    property("figure", "The figure holding these axes.", axes_figure),
    method("get_title", "Return the axes title.", axes_get_title),
    method("set_title", "Set the axes title.", axes_set_title),
];

static FIGURE_MEMBERS: &[MemberSpec] = &[
    property("axes", "The axes of the figure.", figure_axes),
    method("get_axes", "Return the list of axes.", figure_axes),
];

/// The member table of a value's type.
pub fn member_table(value: &Value) -> &'static [MemberSpec] {
    match value {
        Value::Frame(_) => FRAME_MEMBERS,
        Value::Series(_) => SERIES_MEMBERS,
        Value::Number(_) | Value::Boolean(_) => NUMBER_MEMBERS,
        Value::String(_) => STRING_MEMBERS,
        Value::List(_) => LIST_MEMBERS,
        Value::Plot(_) => PLOT_MEMBERS,
        Value::Axes(_) => AXES_MEMBERS,
        Value::Figure(_) => FIGURE_MEMBERS,
        Value::Null | Value::Method(_) => &[],
    }
}

fn find_member(value: &Value, name: &str) -> Option<&'static MemberSpec> {
    member_table(value).iter().find(|spec| spec.name == name)
}

/// Public member names of a value, including frame column names.
pub fn members(value: &Value) -> Vec<String> {
    let mut names: Vec<String> = member_table(value)
        .iter()
        .map(|spec| spec.name.to_string())
        .collect();
    match value {
        Value::Frame(frame) => names.extend(frame.column_names()),
        Value::Method(m) if m.name == "plot" => {
            names.extend(plot::PLOT_KINDS.iter().map(|k| k.to_string()))
        }
        _ => {}
    }
    names.retain(|name| !name.starts_with('_'));
    names
}

/// Looks up `name` on `value`, as `getattr(value, name)`.
pub fn get_attr(value: &Value, name: &str) -> InteractiveResult<Value> {
    trace!("get_attr {} on {}", name, value.type_name());
    if let Value::Method(m) = value {
        if m.name == "plot" && plot::is_plot_kind(name) {
            return Ok(Value::Method(BoundMethod::new(
                (*m.receiver).clone(),
                format!("plot.{}", name),
            )));
        }
        return Err(InteractiveError::attribute_not_found(name, "method"));
    }
    if let Some(spec) = find_member(value, name) {
        return match spec.kind {
            MemberKind::Property => (spec.func)(value, &CallArgs::default()),
            MemberKind::Method => Ok(Value::Method(BoundMethod::new(value.clone(), name))),
        };
    }
    if let Value::Frame(frame) = value {
        if let Some(column) = frame.column(name) {
            return Ok(Value::Series(column));
        }
    }
    Err(InteractiveError::attribute_not_found(name, value.type_name()))
}

/// Documentation of a member, if it has any.
pub fn member_doc(value: &Value, name: &str) -> Option<String> {
    if let Some(spec) = find_member(value, name) {
        return Some(spec.doc.to_string());
    }
    match value {
        Value::Frame(frame) if frame.has_column(name) => Some(format!("Column '{}' as a Series.", name)),
        Value::Method(m) if m.name == "plot" && plot::is_plot_kind(name) => {
            Some(format!("Draw a {} plot.", name))
        }
        _ => None,
    }
}

/// Calls a bound method.
pub fn call(callee: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let method = match callee {
        Value::Method(m) => m,
        other => {
            return Err(InteractiveError::not_callable(format!(
                "'{}' object is not callable",
                other.type_name()
            )))
        }
    };
    if let Some(kind) = method.name.strip_prefix("plot.") {
        if args.kwargs.contains("kind") {
            return Err(InteractiveError::invalid_argument_named(
                format!("{}() got an unexpected keyword argument 'kind'", kind),
                "kind",
            ));
        }
        let mut args = args.clone();
        args.kwargs.insert("kind", Value::from(kind));
        return draw_plot(&method.receiver, &args);
    }
    let spec = find_member(&method.receiver, &method.name)
        .ok_or_else(|| InteractiveError::attribute_not_found(&method.name, method.receiver.type_name()))?;
    (spec.func)(&method.receiver, args)
}

fn wrong_receiver(operation: &str, value: &Value) -> InteractiveError {
    InteractiveError::evaluation(
        format!("'{}' is not supported on '{}'", operation, value.type_name()),
        operation,
    )
}

fn frame_columns(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let frame = value.as_frame().ok_or_else(|| wrong_receiver("columns", value))?;
    Ok(Value::List(frame.column_names().into_iter().map(Value::from).collect()))
}

fn shape(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Frame(f) => Ok(Value::List(vec![f.n_rows().into(), f.n_cols().into()])),
        Value::Series(s) => Ok(Value::List(vec![s.len().into()])),
        other => Err(wrong_receiver("shape", other)),
    }
}

fn size(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Frame(f) => Ok((f.n_rows() * f.n_cols()).into()),
        Value::Series(s) => Ok(s.len().into()),
        other => Err(wrong_receiver("size", other)),
    }
}

fn empty(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Frame(f) => Ok(f.is_empty().into()),
        Value::Series(s) => Ok(s.is_empty().into()),
        other => Err(wrong_receiver("empty", other)),
    }
}

fn index_labels(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Frame(f) => Ok(Value::List(f.index().to_vec())),
        Value::Series(s) => Ok(Value::List(s.index().to_vec())),
        other => Err(wrong_receiver("index", other)),
    }
}

fn head(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let n = args.usize_or(0, "n", 5)?;
    match value {
        Value::Frame(f) => Ok(Value::Frame(f.head(n))),
        Value::Series(s) => Ok(Value::Series(s.head(n))),
        other => Err(wrong_receiver("head", other)),
    }
}

fn tail(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let n = args.usize_or(0, "n", 5)?;
    match value {
        Value::Frame(f) => Ok(Value::Frame(f.tail(n))),
        Value::Series(s) => Ok(Value::Series(s.tail(n))),
        other => Err(wrong_receiver("tail", other)),
    }
}

fn reduction(
    value: &Value,
    operation: &str,
    f: impl Fn(&Series) -> InteractiveResult<Value>,
) -> InteractiveResult<Value> {
    match value {
        Value::Frame(frame) => reduce_frame(frame, f),
        Value::Series(s) => f(s),
        other => Err(wrong_receiver(operation, other)),
    }
}

fn max(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    reduction(value, "max", Series::max)
}

fn min(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    reduction(value, "min", Series::min)
}

fn sum(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    reduction(value, "sum", Series::sum)
}

fn mean(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    reduction(value, "mean", Series::mean)
}

fn count(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    reduction(value, "count", |s| Ok(s.count().into()))
}

fn abs(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    ops::unary(UnaryOp::Abs, value)
}

fn round(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let decimals = match args.get(0, "decimals") {
        None => 0,
        Some(v) => {
            let n = v
                .as_i64()
                .ok_or_else(|| type_error("decimals", "an integer", v))?;
            i32::try_from(n).map_err(|_| {
                InteractiveError::evaluation(format!("decimals {} out of range", n), "round")
            })?
        }
    };
    ops::unary(UnaryOp::Round(Some(decimals)), value)
}

fn cumsum(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("cumsum", value))?;
    series.cumsum().map(Value::Series)
}

fn unique(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("unique", value))?;
    Ok(Value::List(series.unique()))
}

fn series_sort_values(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("sort_values", value))?;
    let ascending = args.bool_or(1, "ascending", true)?;
    Ok(Value::Series(series.sort_values(ascending)))
}

fn frame_sort_values(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let frame = value.as_frame().ok_or_else(|| wrong_receiver("sort_values", value))?;
    let by = args.string(0, "by")?;
    let ascending = args.bool_or(1, "ascending", true)?;
    frame.sort_values(&by, ascending).map(Value::Frame)
}

fn reset_index(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(value.clone().reset_index())
}

fn frame_drop(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let frame = value.as_frame().ok_or_else(|| wrong_receiver("drop", value))?;
    let names = match args.required(0, "columns")? {
        Value::String(s) => vec![s.clone()],
        Value::List(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| type_error("columns", "strings", v)))
            .collect::<InteractiveResult<Vec<_>>>()?,
        other => return Err(type_error("columns", "a label or list of labels", other)),
    };
    frame.drop(&names).map(Value::Frame)
}

fn series_name(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("name", value))?;
    Ok(series.name().map(Value::from).unwrap_or(Value::Null))
}

fn series_values(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("values", value))?;
    Ok(Value::List(series.values().to_vec()))
}

fn isin(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let series = value.as_series().ok_or_else(|| wrong_receiver("isin", value))?;
    let candidates = match args.required(0, "values")? {
        Value::List(items) => items.clone(),
        Value::Series(s) => s.values().to_vec(),
        other => return Err(type_error("values", "list-like", other)),
    };
    series
        .map(|v| Ok(Value::Boolean(candidates.contains(v))))
        .map(Value::Series)
}

fn between(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let left = args.required(0, "left")?;
    let right = args.required(1, "right")?;
    let lower = ops::binary(BinaryOp::Ge, value, left)?;
    let upper = ops::binary(BinaryOp::Le, value, right)?;
    ops::binary(BinaryOp::And, &lower, &upper)
}

fn number_real(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    value
        .as_f64()
        .map(Value::Number)
        .ok_or_else(|| wrong_receiver("real", value))
}

fn number_imag(_: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(Value::Number(0.0))
}

fn number_is_integer(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(Value::Boolean(value.as_i64().is_some()))
}

fn receiver_str<'a>(value: &'a Value, operation: &str) -> InteractiveResult<&'a str> {
    value.as_str().ok_or_else(|| wrong_receiver(operation, value))
}

fn str_upper(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(receiver_str(value, "upper")?.to_uppercase().into())
}

fn str_lower(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(receiver_str(value, "lower")?.to_lowercase().into())
}

fn str_strip(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    Ok(receiver_str(value, "strip")?.trim().into())
}

fn str_title(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    let mut out = String::new();
    let mut boundary = true;
    for c in receiver_str(value, "title")?.chars() {
        if boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        boundary = !c.is_alphabetic();
    }
    Ok(out.into())
}

fn str_startswith(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let prefix = args.string(0, "prefix")?;
    Ok(receiver_str(value, "startswith")?.starts_with(&prefix).into())
}

fn str_endswith(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let suffix = args.string(0, "suffix")?;
    Ok(receiver_str(value, "endswith")?.ends_with(&suffix).into())
}

fn str_split(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let s = receiver_str(value, "split")?;
    let parts: Vec<Value> = match args.get(0, "sep") {
        None => s.split_whitespace().map(Value::from).collect(),
        Some(_) => {
            let sep = args.string(0, "sep")?;
            s.split(sep.as_str()).map(Value::from).collect()
        }
    };
    Ok(Value::List(parts))
}

fn str_replace(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let old = args.string(0, "old")?;
    let new = args.string(1, "new")?;
    Ok(receiver_str(value, "replace")?.replace(&old, &new).into())
}

fn list_count(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let needle = args.args.first().cloned().unwrap_or(Value::Null);
    match value {
        Value::List(items) => Ok(items.iter().filter(|v| **v == needle).count().into()),
        other => Err(wrong_receiver("count", other)),
    }
}

fn list_index(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let needle = args.args.first().cloned().unwrap_or(Value::Null);
    match value {
        Value::List(items) => items
            .iter()
            .position(|v| *v == needle)
            .map(Value::from)
            .ok_or_else(|| InteractiveError::evaluation(format!("{} is not in list", needle), "index")),
        other => Err(wrong_receiver("index", other)),
    }
}

fn plot_kind(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Plot(p) => Ok(Value::from(p.kind.as_str())),
        other => Err(wrong_receiver("kind", other)),
    }
}

fn plot_opts(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Plot(p) => Ok(Value::Plot(p.with_options(&args.kwargs))),
        other => Err(wrong_receiver("opts", other)),
    }
}

fn axes_figure(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Axes(ax) => Ok(Value::Figure(ax.figure())),
        other => Err(wrong_receiver("figure", other)),
    }
}

fn axes_get_title(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Axes(ax) => Ok(ax.title().map(Value::from).unwrap_or_else(|| "".into())),
        other => Err(wrong_receiver("get_title", other)),
    }
}

fn axes_set_title(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let title = args.string(0, "label")?;
    match value {
        Value::Axes(ax) => {
            ax.set_title(title);
            Ok(Value::Null)
        }
        other => Err(wrong_receiver("set_title", other)),
    }
}

fn figure_axes(value: &Value, _: &CallArgs) -> InteractiveResult<Value> {
    match value {
        Value::Figure(figure) => Ok(Value::List(vec![Value::Axes(figure.axes())])),
        other => Err(wrong_receiver("axes", other)),
    }
}

/// Declares a plot. Positional arguments are `x`, `y`, `kind`.
fn hvplot(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    if !matches!(value, Value::Frame(_) | Value::Series(_)) {
        return Err(wrong_receiver("hvplot", value));
    }
    let kind = match args.get(2, "kind") {
        None => plot::DEFAULT_KIND.to_string(),
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => return Err(type_error("kind", "a string", other)),
    };
    if !plot::is_hvplot_kind(&kind) {
        return Err(InteractiveError::unsupported_kind(kind, value.type_name()));
    }
    let mut spec = PlotSpec::new(kind, value.clone());
    spec.x = match args.get(0, "x") {
        None => None,
        Some(Value::String(x)) => Some(x.clone()),
        Some(other) => return Err(type_error("x", "a column name", other)),
    };
    spec.y = args.get(1, "y").cloned().map(Box::new);
    spec.options = args
        .kwargs
        .iter()
        .filter(|(k, _)| !matches!(*k, "x" | "y" | "kind"))
        .map(|(k, v)| (k, v.clone()))
        .collect();
    Ok(Value::Plot(spec))
}

/// Draws the data on the `ax` axes, or on a new figure, and returns the axes.
fn draw_plot(value: &Value, args: &CallArgs) -> InteractiveResult<Value> {
    let kind = match args.kwargs.get("kind") {
        None => plot::DEFAULT_KIND.to_string(),
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => return Err(type_error("kind", "a string", other)),
    };
    if !plot::is_plot_kind(&kind) {
        return Err(InteractiveError::unsupported_kind(kind, value.type_name()));
    }
    let axes = match args.kwargs.get("ax") {
        Some(Value::Axes(ax)) => ax.clone(),
        Some(other) => return Err(type_error("ax", "Axes", other)),
        None => Figure::new().axes(),
    };
    let artists: Vec<Artist> = match value {
        Value::Series(s) => vec![Artist {
            kind: kind.clone(),
            label: s.name().map(str::to_string),
            points: s.len(),
        }],
        Value::Frame(f) => plotted_columns(f)
            .into_iter()
            .map(|name| Artist {
                kind: kind.clone(),
                label: Some(name),
                points: f.n_rows(),
            })
            .collect(),
        other => return Err(wrong_receiver("plot", other)),
    };
    for artist in artists {
        axes.draw(artist);
    }
    if let Some(Value::String(title)) = args.kwargs.get("title") {
        axes.set_title(title.clone());
    }
    Ok(Value::Axes(axes))
}

fn plotted_columns(frame: &Frame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .filter(|c| c.values.iter().all(|v| v.is_null() || v.as_f64().is_some()))
        .map(|c| c.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Value {
        Value::Frame(
            Frame::new(vec![
                ("A", vec![1.into(), 2.into(), 3.into()]),
                ("B", vec!["x".into(), "y".into(), "z".into()]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_members_include_columns() {
        let names = members(&frame());
        assert!(names.contains(&"A".to_string()));
        assert!(names.contains(&"head".to_string()));
        assert!(names.contains(&"columns".to_string()));
    }

    #[test]
    fn test_method_call() {
        let a = get_attr(&frame(), "A").unwrap();
        let max = get_attr(&a, "max").unwrap();
        assert!(matches!(max, Value::Method(_)));
        assert_eq!(call(&max, &CallArgs::default()).unwrap(), Value::from(3));
    }

    #[test]
    fn test_property_is_evaluated() {
        let shape = get_attr(&frame(), "shape").unwrap();
        assert_eq!(shape, Value::List(vec![3.into(), 2.into()]));
    }

    #[test]
    fn test_missing_attribute() {
        let err = get_attr(&frame(), "nope").unwrap_err();
        assert_eq!(err.to_string(), "'DataFrame' object has no attribute 'nope'");
    }

    #[test]
    fn test_round_decimals_out_of_range() {
        let a = get_attr(&frame(), "A").unwrap();
        let round = get_attr(&a, "round").unwrap();
        let args = CallArgs::new(vec![Value::from(i64::MAX)], Kwargs::new());
        let err = call(&round, &args).unwrap_err();
        assert!(err.is_evaluation());

        let args = CallArgs::new(vec![Value::from(1)], Kwargs::new());
        assert!(call(&round, &args).is_ok());
    }

    #[test]
    fn test_hvplot_keeps_y_column() {
        let method = get_attr(&frame(), "hvplot").unwrap();
        let args = CallArgs::new(vec!["B".into(), "A".into()], Kwargs::new());
        match call(&method, &args).unwrap() {
            Value::Plot(spec) => {
                assert_eq!(spec.x.as_deref(), Some("B"));
                assert_eq!(spec.y.as_deref(), Some(&Value::from("A")));
                assert_eq!(spec.to_json()["y"], serde_json::json!("A"));
            }
            other => panic!("expected a plot, got {:?}", other),
        }
    }

    #[test]
    fn test_hvplot_rejects_unknown_kind() {
        let method = get_attr(&frame(), "hvplot").unwrap();
        let args = CallArgs::new(vec![], Kwargs::new().with("kind", "pie"));
        assert!(matches!(
            call(&method, &args),
            Err(InteractiveError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn test_plot_draws_on_given_axes() {
        let figure = Figure::new();
        let method = get_attr(&frame(), "plot").unwrap();
        let args = CallArgs::new(vec![], Kwargs::new().with("ax", Value::Axes(figure.axes())));
        call(&method, &args).unwrap();
        let artists = figure.axes().artists();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].label.as_deref(), Some("A"));
    }

    #[test]
    fn test_plot_kind_shortcut() {
        let a = get_attr(&frame(), "A").unwrap();
        let plot = get_attr(&a, "plot").unwrap();
        let bar = get_attr(&plot, "bar").unwrap();
        let axes = call(&bar, &CallArgs::default()).unwrap();
        match axes {
            Value::Axes(ax) => assert_eq!(ax.artists()[0].kind, "bar"),
            other => panic!("expected axes, got {:?}", other),
        }
    }
}
