//! Operator semantics for values.
//!
//! Binary operators broadcast: series with series (equal length), series or
//! frame with a scalar, and frame with frame (matched by column name). Null
//! propagates through arithmetic and compares unequal to everything.

use super::frame::Frame;
use super::series::Series;
use super::value::Value;
use crate::error::{InteractiveError, InteractiveResult};
use crate::transform::ast::{BinaryOp, Ufunc, UnaryOp};

/// Applies a binary operator to two values.
pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> InteractiveResult<Value> {
    match (left, right) {
        (Value::Series(a), Value::Series(b)) => series_series(op, a, b).map(Value::Series),
        (Value::Series(a), r) if r.is_scalar() => a.map(|x| scalar(op, x, r)).map(Value::Series),
        (l, Value::Series(b)) if l.is_scalar() => b.map(|x| scalar(op, l, x)).map(Value::Series),
        (Value::Frame(a), Value::Frame(b)) => a.zip_with(b, |x, y| scalar(op, x, y)).map(Value::Frame),
        (Value::Frame(a), r) if r.is_scalar() => a.map_values(|x| scalar(op, x, r)).map(Value::Frame),
        (l, Value::Frame(b)) if l.is_scalar() => b.map_values(|x| scalar(op, l, x)).map(Value::Frame),
        (Value::List(a), Value::List(b)) => list_list(op, a, b),
        (l, r) if l.is_scalar() && r.is_scalar() => scalar(op, l, r),
        (l, r) => match op {
            BinaryOp::Eq => Ok(Value::Boolean(l == r)),
            BinaryOp::Ne => Ok(Value::Boolean(l != r)),
            _ => Err(unsupported(op, l, r)),
        },
    }
}

fn series_series(op: BinaryOp, a: &Series, b: &Series) -> InteractiveResult<Series> {
    if a.len() != b.len() {
        return Err(InteractiveError::evaluation(
            format!(
                "operands could not be broadcast together with lengths {} and {}",
                a.len(),
                b.len()
            ),
            op.symbol(),
        ));
    }
    let values = a
        .values()
        .iter()
        .zip(b.values())
        .map(|(x, y)| scalar(op, x, y))
        .collect::<InteractiveResult<Vec<_>>>()?;
    let name = if a.name() == b.name() {
        a.name().map(str::to_string)
    } else {
        None
    };
    Series::with_index(name, a.index().to_vec(), values)
}

fn list_list(op: BinaryOp, a: &[Value], b: &[Value]) -> InteractiveResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::List(a.iter().chain(b).cloned().collect())),
        BinaryOp::Eq => Ok(Value::Boolean(a == b)),
        BinaryOp::Ne => Ok(Value::Boolean(a != b)),
        _ => Err(unsupported(op, &Value::List(a.to_vec()), &Value::List(b.to_vec()))),
    }
}

/// Applies a binary operator to two scalars.
pub fn scalar(op: BinaryOp, left: &Value, right: &Value) -> InteractiveResult<Value> {
    if left.is_null() || right.is_null() {
        return Ok(match op {
            BinaryOp::Eq => Value::Boolean(false),
            BinaryOp::Ne => Value::Boolean(true),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => Value::Boolean(false),
            _ => Value::Null,
        });
    }
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return string_string(op, a, b);
    }
    if let (Value::String(s), n) | (n, Value::String(s)) = (left, right) {
        return match (op, n.as_i64()) {
            (BinaryOp::Mul, Some(times)) => repeat_string(s, times).map(Value::String),
            (BinaryOp::Eq, _) => Ok(Value::Boolean(false)),
            (BinaryOp::Ne, _) => Ok(Value::Boolean(true)),
            _ => Err(unsupported(op, left, right)),
        };
    }
    if let (Value::Boolean(a), Value::Boolean(b)) = (left, right) {
        match op {
            BinaryOp::And => return Ok(Value::Boolean(*a && *b)),
            BinaryOp::Or => return Ok(Value::Boolean(*a || *b)),
            BinaryOp::Xor => return Ok(Value::Boolean(a ^ b)),
            _ => {}
        }
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => numeric(op, a, b, left, right),
        _ => Err(unsupported(op, left, right)),
    }
}

fn numeric(op: BinaryOp, a: f64, b: f64, left: &Value, right: &Value) -> InteractiveResult<Value> {
    let number = |n: f64| Ok(Value::Number(n));
    let boolean = |b: bool| Ok(Value::Boolean(b));
    match op {
        BinaryOp::Add => number(a + b),
        BinaryOp::Sub => number(a - b),
        BinaryOp::Mul => number(a * b),
        BinaryOp::TrueDiv => number(a / b),
        BinaryOp::FloorDiv => number((a / b).floor()),
        BinaryOp::Mod => number(python_mod(a, b)),
        BinaryOp::Pow => number(a.powf(b)),
        BinaryOp::Eq => boolean(a == b),
        BinaryOp::Ne => boolean(a != b),
        BinaryOp::Lt => boolean(a < b),
        BinaryOp::Le => boolean(a <= b),
        BinaryOp::Gt => boolean(a > b),
        BinaryOp::Ge => boolean(a >= b),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor | BinaryOp::LShift | BinaryOp::RShift => {
            let (x, y) = match (left.as_i64(), right.as_i64()) {
                (Some(x), Some(y)) => (x, y),
                _ => return Err(unsupported(op, left, right)),
            };
            let result = match op {
                BinaryOp::And => x & y,
                BinaryOp::Or => x | y,
                BinaryOp::Xor => x ^ y,
                BinaryOp::LShift | BinaryOp::RShift if !(0..64).contains(&y) => {
                    return Err(InteractiveError::evaluation("negative or too large shift count", op.symbol()))
                }
                BinaryOp::LShift => x << y,
                _ => x >> y,
            };
            number(result as f64)
        }
    }
}

fn string_string(op: BinaryOp, a: &str, b: &str) -> InteractiveResult<Value> {
    Ok(match op {
        BinaryOp::Add => Value::String(format!("{}{}", a, b)),
        BinaryOp::Eq => Value::Boolean(a == b),
        BinaryOp::Ne => Value::Boolean(a != b),
        BinaryOp::Lt => Value::Boolean(a < b),
        BinaryOp::Le => Value::Boolean(a <= b),
        BinaryOp::Gt => Value::Boolean(a > b),
        BinaryOp::Ge => Value::Boolean(a >= b),
        _ => return Err(unsupported(op, &Value::from(a), &Value::from(b))),
    })
}

/// Modulo with the sign of the divisor.
fn python_mod(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return f64::NAN;
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> InteractiveError {
    InteractiveError::evaluation(
        format!(
            "unsupported operand type(s) for {}: '{}' and '{}'",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ),
        op.symbol(),
    )
}

/// Applies a unary operator, element-wise for series and frames.
pub fn unary(op: UnaryOp, value: &Value) -> InteractiveResult<Value> {
    match (op, value) {
        (UnaryOp::Not, Value::Series(_) | Value::Frame(_)) => Err(InteractiveError::evaluation(
            format!(
                "The truth value of a {} is ambiguous. Use a.empty, a.any() or a.all().",
                value.type_name()
            ),
            op.symbol(),
        )),
        (_, Value::Series(s)) => s.map(|x| unary_scalar(op, x)).map(Value::Series),
        (_, Value::Frame(f)) => f.map_values(|x| unary_scalar(op, x)).map(Value::Frame),
        (UnaryOp::Not, other) => other.truthy().map(|b| Value::Boolean(!b)).ok_or_else(|| {
            InteractiveError::evaluation(
                format!("The truth value of a {} is ambiguous", other.type_name()),
                op.symbol(),
            )
        }),
        (_, other) => unary_scalar(op, other),
    }
}

fn unary_scalar(op: UnaryOp, value: &Value) -> InteractiveResult<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let bad_operand = || {
        InteractiveError::evaluation(
            format!("bad operand type for unary {}: '{}'", op.symbol(), value.type_name()),
            op.symbol(),
        )
    };
    match op {
        UnaryOp::Not => value
            .truthy()
            .map(|b| Value::Boolean(!b))
            .ok_or_else(bad_operand),
        UnaryOp::Invert => match value {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => other
                .as_i64()
                .map(|i| Value::Number(!i as f64))
                .ok_or_else(bad_operand),
        },
        UnaryOp::Neg => value.as_f64().map(|n| Value::Number(-n)).ok_or_else(bad_operand),
        UnaryOp::Pos => value.as_f64().map(Value::Number).ok_or_else(bad_operand),
        UnaryOp::Abs => value.as_f64().map(|n| Value::Number(n.abs())).ok_or_else(bad_operand),
        UnaryOp::Round(ndigits) => value
            .as_f64()
            .map(|n| Value::Number(round_half_even(n, ndigits.unwrap_or(0))))
            .ok_or_else(bad_operand),
    }
}

/// `s * times`; a non-positive count gives the empty string.
fn repeat_string(s: &str, times: i64) -> InteractiveResult<String> {
    let times = usize::try_from(times.max(0)).unwrap_or(usize::MAX);
    let len = s.len().checked_mul(times).ok_or_else(|| {
        InteractiveError::evaluation(format!("cannot repeat a string {} times", times), "mul")
    })?;
    let mut out = String::new();
    out.try_reserve_exact(len).map_err(|e| {
        InteractiveError::evaluation(format!("cannot repeat a string {} times: {}", times, e), "mul")
    })?;
    for _ in 0..times {
        out.push_str(s);
    }
    Ok(out)
}

/// Rounds to `ndigits` decimals, ties to even.
pub fn round_half_even(value: f64, ndigits: i32) -> f64 {
    let factor = 10f64.powi(ndigits);
    (value * factor).round_ties_even() / factor
}

/// Applies an element-wise function.
pub fn ufunc(func: Ufunc, value: &Value) -> InteractiveResult<Value> {
    let apply = |x: &Value| -> InteractiveResult<Value> {
        if x.is_null() {
            return Ok(Value::Null);
        }
        let n = x.as_f64().ok_or_else(|| {
            InteractiveError::evaluation(
                format!("ufunc '{}' not supported for '{}'", func.name(), x.type_name()),
                func.name(),
            )
        })?;
        Ok(Value::Number(func.apply(n)))
    };
    match value {
        Value::Series(s) => s.map(apply).map(Value::Series),
        Value::Frame(f) => f.map_values(apply).map(Value::Frame),
        Value::List(items) => items
            .iter()
            .map(apply)
            .collect::<InteractiveResult<Vec<_>>>()
            .map(Value::List),
        other => apply(other),
    }
}

/// Indexes `value` with `key`, as `value[key]`.
pub fn index(value: &Value, key: &Value) -> InteractiveResult<Value> {
    match (value, key) {
        (Value::Frame(f), Value::String(name)) => f.column(name).map(Value::Series).ok_or_else(|| {
            InteractiveError::evaluation(format!("column '{}' not found", name), "getitem")
        }),
        (Value::Frame(f), Value::List(names)) => {
            let names = names
                .iter()
                .map(|n| {
                    n.as_str().map(str::to_string).ok_or_else(|| {
                        InteractiveError::evaluation("column labels must be strings", "getitem")
                    })
                })
                .collect::<InteractiveResult<Vec<_>>>()?;
            f.select(&names).map(Value::Frame)
        }
        (Value::Frame(f), Value::Series(mask)) => f.mask(mask).map(Value::Frame),
        (Value::Series(s), Value::Series(mask)) => s.mask(mask).map(Value::Series),
        (Value::Series(s), Value::List(labels)) => {
            let positions = labels
                .iter()
                .map(|label| label_position(s, label))
                .collect::<InteractiveResult<Vec<_>>>()?;
            Ok(Value::Series(s.take(&positions)))
        }
        (Value::Series(s), label) if label.is_scalar() => {
            let position = label_position(s, label)?;
            Ok(s.values()[position].clone())
        }
        (Value::List(items), position) => {
            let i = sequence_position(items.len(), position)?;
            Ok(items[i].clone())
        }
        (Value::String(s), position) => {
            let chars: Vec<char> = s.chars().collect();
            let i = sequence_position(chars.len(), position)?;
            Ok(Value::String(chars[i].to_string()))
        }
        (other, key) => Err(InteractiveError::evaluation(
            format!(
                "'{}' object is not subscriptable with '{}'",
                other.type_name(),
                key.type_name()
            ),
            "getitem",
        )),
    }
}

fn label_position(series: &Series, label: &Value) -> InteractiveResult<usize> {
    series
        .index()
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| InteractiveError::evaluation(format!("label {} not in index", label), "getitem"))
}

fn sequence_position(len: usize, position: &Value) -> InteractiveResult<usize> {
    let i = position.as_i64().ok_or_else(|| {
        InteractiveError::evaluation(
            format!("indices must be integers, not {}", position.type_name()),
            "getitem",
        )
    })?;
    let resolved = if i < 0 { i + len as i64 } else { i };
    if resolved < 0 || resolved >= len as i64 {
        return Err(InteractiveError::evaluation("index out of range", "getitem"));
    }
    Ok(resolved as usize)
}

/// Frame column reductions share one shape: a series indexed by column.
pub(crate) fn reduce_frame(
    frame: &Frame,
    f: impl FnMut(&Series) -> InteractiveResult<Value>,
) -> InteractiveResult<Value> {
    frame.reduce(f).map(Value::Series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Value {
        Value::Series(Series::from_f64("A", values.iter().copied()))
    }

    #[test]
    fn test_series_scalar_comparison() {
        let result = binary(BinaryOp::Gt, &series(&[1.0, 2.0, 3.0]), &Value::from(1)).unwrap();
        let mask = result.as_series().unwrap();
        assert_eq!(mask.values(), &[false.into(), true.into(), true.into()]);
        assert_eq!(mask.name(), Some("A"));
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = binary(BinaryOp::Add, &series(&[1.0]), &series(&[1.0, 2.0])).unwrap_err();
        assert!(err.is_evaluation());
    }

    #[test]
    fn test_python_modulo_and_floordiv() {
        assert_eq!(scalar(BinaryOp::Mod, &(-7).into(), &3.into()).unwrap(), Value::Number(2.0));
        assert_eq!(scalar(BinaryOp::FloorDiv, &(-7).into(), &2.into()).unwrap(), Value::Number(-4.0));
    }

    #[test]
    fn test_null_comparisons() {
        assert_eq!(scalar(BinaryOp::Eq, &Value::Null, &Value::Null).unwrap(), Value::Boolean(false));
        assert_eq!(scalar(BinaryOp::Add, &Value::Null, &1.into()).unwrap(), Value::Null);
    }

    #[test]
    fn test_not_on_series_is_ambiguous() {
        assert!(unary(UnaryOp::Not, &series(&[1.0])).is_err());
        assert_eq!(unary(UnaryOp::Invert, &Value::Boolean(true)).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(1.26, 1), 1.3);
    }

    #[test]
    fn test_string_repeat() {
        let ab = Value::from("ab");
        assert_eq!(scalar(BinaryOp::Mul, &ab, &3.into()).unwrap(), Value::from("ababab"));
        assert_eq!(scalar(BinaryOp::Mul, &(-2).into(), &ab).unwrap(), Value::from(""));
    }

    #[test]
    fn test_huge_string_repeat_is_error() {
        let err = scalar(BinaryOp::Mul, &Value::from("ab"), &Value::from(i64::MAX)).unwrap_err();
        assert!(err.is_evaluation());
    }

    #[test]
    fn test_index_list_negative() {
        let list = Value::List(vec![1.into(), 2.into()]);
        assert_eq!(index(&list, &(-1).into()).unwrap(), Value::from(2));
        assert!(index(&list, &5.into()).is_err());
    }
}
