//! One-dimensional labelled arrays.

use super::value::Value;
use crate::error::{InteractiveError, InteractiveResult};
use serde_json::{json, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;

/// A labelled array of scalar values with an optional name.
///
/// Row labels survive filtering and slicing, so a filtered series can still
/// be matched back to the rows it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: Option<String>,
    index: Vec<Value>,
    values: Vec<Value>,
}

impl Series {
    /// Creates a series with a default `0..n` index.
    pub fn new(name: Option<String>, values: Vec<Value>) -> Self {
        let index = (0..values.len()).map(Value::from).collect();
        Self {
            name,
            index,
            values,
        }
    }

    pub fn named(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(Some(name.into()), values)
    }

    pub fn unnamed(values: Vec<Value>) -> Self {
        Self::new(None, values)
    }

    /// Creates a named numeric series.
    pub fn from_f64(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::named(name, values.into_iter().map(Value::Number).collect())
    }

    /// Creates a series with explicit row labels.
    pub fn with_index(
        name: Option<String>,
        index: Vec<Value>,
        values: Vec<Value>,
    ) -> InteractiveResult<Self> {
        if index.len() != values.len() {
            return Err(InteractiveError::evaluation(
                format!(
                    "Length of index ({}) does not match length of values ({})",
                    index.len(),
                    values.len()
                ),
                "Series",
            ));
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &[Value] {
        &self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn rename(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn reset_index(mut self) -> Self {
        self.index = (0..self.values.len()).map(Value::from).collect();
        self
    }

    /// Applies `f` to every element, keeping name and labels.
    pub fn map<F>(&self, mut f: F) -> InteractiveResult<Series>
    where
        F: FnMut(&Value) -> InteractiveResult<Value>,
    {
        let values = self
            .values
            .iter()
            .map(&mut f)
            .collect::<InteractiveResult<Vec<_>>>()?;
        Ok(Self {
            name: self.name.clone(),
            index: self.index.clone(),
            values,
        })
    }

    /// Selects rows by position.
    pub fn take(&self, positions: &[usize]) -> Series {
        Self {
            name: self.name.clone(),
            index: positions.iter().map(|&p| self.index[p].clone()).collect(),
            values: positions.iter().map(|&p| self.values[p].clone()).collect(),
        }
    }

    /// Keeps the rows where `mask` is true.
    pub fn mask(&self, mask: &Series) -> InteractiveResult<Series> {
        let positions = mask_positions(mask, self.len())?;
        Ok(self.take(&positions))
    }

    pub fn head(&self, n: usize) -> Series {
        let positions: Vec<usize> = (0..self.len().min(n)).collect();
        self.take(&positions)
    }

    pub fn tail(&self, n: usize) -> Series {
        let start = self.len().saturating_sub(n);
        let positions: Vec<usize> = (start..self.len()).collect();
        self.take(&positions)
    }

    /// Non-null numeric values; errors if a non-numeric value is present.
    pub fn numeric(&self, operation: &str) -> InteractiveResult<Vec<f64>> {
        let mut out = Vec::with_capacity(self.len());
        for value in &self.values {
            match value {
                Value::Null => {}
                other => match other.as_f64() {
                    Some(n) if !n.is_nan() => out.push(n),
                    Some(_) => {}
                    None => {
                        return Err(InteractiveError::evaluation(
                            format!("cannot compute {} of {} values", operation, other.type_name()),
                            operation,
                        ))
                    }
                },
            }
        }
        Ok(out)
    }

    pub fn max(&self) -> InteractiveResult<Value> {
        self.extreme("max", Ordering::Greater)
    }

    pub fn min(&self) -> InteractiveResult<Value> {
        self.extreme("min", Ordering::Less)
    }

    fn extreme(&self, operation: &str, wanted: Ordering) -> InteractiveResult<Value> {
        let present: Vec<&Value> = self.values.iter().filter(|v| !v.is_null()).collect();
        if present.iter().all(|v| v.as_str().is_some()) && !present.is_empty() {
            let best = present
                .into_iter()
                .reduce(|a, b| if compare_values(b, a) == wanted { b } else { a });
            return Ok(best.cloned().unwrap_or(Value::Null));
        }
        let numbers = self.numeric(operation)?;
        let best = numbers.into_iter().reduce(|a, b| {
            if b.partial_cmp(&a) == Some(wanted) {
                b
            } else {
                a
            }
        });
        Ok(best.map(Value::Number).unwrap_or(Value::Null))
    }

    pub fn sum(&self) -> InteractiveResult<Value> {
        Ok(Value::Number(self.numeric("sum")?.into_iter().sum()))
    }

    pub fn mean(&self) -> InteractiveResult<Value> {
        let numbers = self.numeric("mean")?;
        if numbers.is_empty() {
            return Ok(Value::Null);
        }
        Ok(Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64))
    }

    /// Number of non-null values.
    pub fn count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// Distinct values in first-seen order.
    pub fn unique(&self) -> Vec<Value> {
        let mut seen: Vec<Value> = Vec::new();
        for value in &self.values {
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        seen
    }

    pub fn cumsum(&self) -> InteractiveResult<Series> {
        let mut total = 0.0;
        self.map(|value| match value {
            Value::Null => Ok(Value::Null),
            other => match other.as_f64() {
                Some(n) => {
                    total += n;
                    Ok(Value::Number(total))
                }
                None => Err(InteractiveError::evaluation(
                    format!("cannot compute cumsum of {} values", other.type_name()),
                    "cumsum",
                )),
            },
        })
    }

    pub fn sort_values(&self, ascending: bool) -> Series {
        let mut positions: Vec<usize> = (0..self.len()).collect();
        positions.sort_by(|&a, &b| {
            let ord = compare_values(&self.values[a], &self.values[b]);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        self.take(&positions)
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "name": self.name,
            "index": self.index.iter().map(Value::to_json).collect::<Vec<_>>(),
            "values": self.values.iter().map(Value::to_json).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.index.iter().zip(&self.values) {
            writeln!(f, "{}    {}", label, value)?;
        }
        match &self.name {
            Some(name) => write!(f, "Name: {}, Length: {}", name, self.len()),
            None => write!(f, "Length: {}", self.len()),
        }
    }
}

/// Total order used for sorting: nulls last, then booleans, numbers, strings.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Boolean(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Null => 4,
            _ => 3,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Positions selected by a boolean mask of the expected length.
pub(crate) fn mask_positions(mask: &Series, expected: usize) -> InteractiveResult<Vec<usize>> {
    if mask.len() != expected {
        return Err(InteractiveError::evaluation(
            format!(
                "Boolean mask has wrong length: {} instead of {}",
                mask.len(),
                expected
            ),
            "getitem",
        ));
    }
    mask.values()
        .iter()
        .enumerate()
        .filter_map(|(position, value)| match value {
            Value::Boolean(true) => Some(Ok(position)),
            Value::Boolean(false) | Value::Null => None,
            other => Some(Err(InteractiveError::evaluation(
                format!("Boolean mask contains a {} value", other.type_name()),
                "getitem",
            ))),
        })
        .collect()
}
