//! Tables of named, equal-length columns.

use super::series::{compare_values, mask_positions, Series};
use super::value::Value;
use crate::error::{InteractiveError, InteractiveResult};
use serde_json::{json, Map, Value as JsonValue};
use std::fmt;

/// A named column of a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// A table of columns sharing one row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    index: Vec<Value>,
}

impl Frame {
    /// Builds a frame from `(name, values)` pairs with a default index.
    pub fn new<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> InteractiveResult<Self> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Column {
                name: name.into(),
                values,
            })
            .collect();
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        validate_columns(&columns, rows)?;
        Ok(Self {
            columns,
            index: (0..rows).map(Value::from).collect(),
        })
    }

    /// Builds a frame from named series. The first series' index is kept.
    pub fn from_series(series: Vec<Series>) -> InteractiveResult<Self> {
        let index = series
            .first()
            .map(|s| s.index().to_vec())
            .unwrap_or_default();
        let mut columns = Vec::with_capacity(series.len());
        for s in series {
            let name = s.name().map(str::to_string).ok_or_else(|| {
                InteractiveError::evaluation("cannot build a frame from an unnamed series", "DataFrame")
            })?;
            columns.push(Column {
                name,
                values: s.values().to_vec(),
            });
        }
        validate_columns(&columns, index.len())?;
        Ok(Self { columns, index })
    }

    /// Builds a frame from a JSON array of records or an object of columns.
    ///
    /// Record keys become columns in first-seen order; missing cells are null.
    pub fn from_records(records: &JsonValue) -> InteractiveResult<Self> {
        match records {
            JsonValue::Array(rows) => {
                let mut names: Vec<String> = Vec::new();
                for row in rows {
                    let object = row.as_object().ok_or_else(|| {
                        InteractiveError::serialization("each record must be a JSON object", "json")
                    })?;
                    for key in object.keys() {
                        if !names.contains(key) {
                            names.push(key.clone());
                        }
                    }
                }
                let columns: Vec<(String, Vec<Value>)> = names
                    .into_iter()
                    .map(|name| {
                        let values = rows
                            .iter()
                            .map(|row| row.get(&name).cloned().map(Value::from).unwrap_or(Value::Null))
                            .collect();
                        (name, values)
                    })
                    .collect();
                Self::new(columns)
            }
            JsonValue::Object(map) => {
                let mut columns = Vec::with_capacity(map.len());
                for (name, column) in map {
                    let values = column.as_array().ok_or_else(|| {
                        InteractiveError::serialization(
                            format!("column '{}' must be a JSON array", name),
                            "json",
                        )
                    })?;
                    columns.push((name.clone(), values.iter().cloned().map(Value::from).collect()));
                }
                Self::new(columns)
            }
            other => Err(InteractiveError::serialization(
                format!("expected records or columns, found {}", other),
                "json",
            )),
        }
    }

    /// Replaces the row labels.
    pub fn with_index(mut self, index: Vec<Value>) -> InteractiveResult<Self> {
        if index.len() != self.n_rows() {
            return Err(InteractiveError::evaluation(
                format!(
                    "Length mismatch: expected {} labels, got {}",
                    self.n_rows(),
                    index.len()
                ),
                "set_index",
            ));
        }
        self.index = index;
        Ok(self)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// The named column as a series sharing the frame's index.
    pub fn column(&self, name: &str) -> Option<Series> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| {
                Series::with_index(Some(c.name.clone()), self.index.clone(), c.values.clone()).ok()
            })
    }

    pub fn index(&self) -> &[Value] {
        &self.index
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    pub fn reset_index(mut self) -> Self {
        self.index = (0..self.n_rows()).map(Value::from).collect();
        self
    }

    /// Selects rows by position.
    pub fn take(&self, positions: &[usize]) -> Frame {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: positions.iter().map(|&p| c.values[p].clone()).collect(),
                })
                .collect(),
            index: positions.iter().map(|&p| self.index[p].clone()).collect(),
        }
    }

    /// Keeps the rows where `mask` is true.
    pub fn mask(&self, mask: &Series) -> InteractiveResult<Frame> {
        let positions = mask_positions(mask, self.n_rows())?;
        Ok(self.take(&positions))
    }

    /// Selects columns by name, in the order given.
    pub fn select(&self, names: &[String]) -> InteractiveResult<Frame> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = self
                .columns
                .iter()
                .find(|c| &c.name == name)
                .ok_or_else(|| missing_column(name))?;
            columns.push(column.clone());
        }
        Ok(Self {
            columns,
            index: self.index.clone(),
        })
    }

    /// Removes the named columns.
    pub fn drop(&self, names: &[String]) -> InteractiveResult<Frame> {
        if let Some(name) = names.iter().find(|n| !self.has_column(n)) {
            return Err(missing_column(name));
        }
        Ok(Self {
            columns: self
                .columns
                .iter()
                .filter(|c| !names.contains(&c.name))
                .cloned()
                .collect(),
            index: self.index.clone(),
        })
    }

    pub fn head(&self, n: usize) -> Frame {
        let positions: Vec<usize> = (0..self.n_rows().min(n)).collect();
        self.take(&positions)
    }

    pub fn tail(&self, n: usize) -> Frame {
        let start = self.n_rows().saturating_sub(n);
        let positions: Vec<usize> = (start..self.n_rows()).collect();
        self.take(&positions)
    }

    /// Reduces each column to one value; the result is indexed by column name.
    pub fn reduce<F>(&self, mut f: F) -> InteractiveResult<Series>
    where
        F: FnMut(&Series) -> InteractiveResult<Value>,
    {
        let mut labels = Vec::with_capacity(self.n_cols());
        let mut values = Vec::with_capacity(self.n_cols());
        for column in &self.columns {
            let series = Series::named(column.name.clone(), column.values.clone());
            labels.push(Value::String(column.name.clone()));
            values.push(f(&series)?);
        }
        Series::with_index(None, labels, values)
    }

    /// Applies `f` to every cell.
    pub fn map_values<F>(&self, mut f: F) -> InteractiveResult<Frame>
    where
        F: FnMut(&Value) -> InteractiveResult<Value>,
    {
        let mut columns = Vec::with_capacity(self.n_cols());
        for column in &self.columns {
            columns.push(Column {
                name: column.name.clone(),
                values: column
                    .values
                    .iter()
                    .map(&mut f)
                    .collect::<InteractiveResult<Vec<_>>>()?,
            });
        }
        Ok(Self {
            columns,
            index: self.index.clone(),
        })
    }

    /// Combines matching columns of two frames cell by cell.
    pub fn zip_with<F>(&self, other: &Frame, mut f: F) -> InteractiveResult<Frame>
    where
        F: FnMut(&Value, &Value) -> InteractiveResult<Value>,
    {
        if self.n_rows() != other.n_rows() {
            return Err(InteractiveError::evaluation(
                format!(
                    "Can only compare identically-labeled frames ({} rows vs {} rows)",
                    self.n_rows(),
                    other.n_rows()
                ),
                "binary",
            ));
        }
        let mut columns = Vec::with_capacity(self.n_cols());
        for column in &self.columns {
            let right = other
                .columns
                .iter()
                .find(|c| c.name == column.name)
                .ok_or_else(|| missing_column(&column.name))?;
            let values = column
                .values
                .iter()
                .zip(&right.values)
                .map(|(a, b)| f(a, b))
                .collect::<InteractiveResult<Vec<_>>>()?;
            columns.push(Column {
                name: column.name.clone(),
                values,
            });
        }
        Ok(Self {
            columns,
            index: self.index.clone(),
        })
    }

    /// Sorts rows by the named column.
    pub fn sort_values(&self, by: &str, ascending: bool) -> InteractiveResult<Frame> {
        let key = self
            .columns
            .iter()
            .find(|c| c.name == by)
            .ok_or_else(|| missing_column(by))?;
        let mut positions: Vec<usize> = (0..self.n_rows()).collect();
        positions.sort_by(|&a, &b| {
            let ord = compare_values(&key.values[a], &key.values[b]);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        Ok(self.take(&positions))
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<JsonValue> {
        (0..self.n_rows())
            .map(|row| {
                let mut object = Map::new();
                for column in &self.columns {
                    object.insert(column.name.clone(), column.values[row].to_json());
                }
                JsonValue::Object(object)
            })
            .collect()
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "columns": self.column_names(),
            "index": self.index.iter().map(Value::to_json).collect::<Vec<_>>(),
            "data": self.to_records(),
        })
    }
}

fn missing_column(name: &str) -> InteractiveError {
    InteractiveError::evaluation(format!("column '{}' not found", name), "getitem")
}

fn validate_columns(columns: &[Column], rows: usize) -> InteractiveResult<()> {
    for (i, column) in columns.iter().enumerate() {
        if column.values.len() != rows {
            return Err(InteractiveError::evaluation(
                format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.values.len(),
                    rows
                ),
                "DataFrame",
            ));
        }
        if columns[..i].iter().any(|c| c.name == column.name) {
            return Err(InteractiveError::evaluation(
                format!("duplicate column '{}'", column.name),
                "DataFrame",
            ));
        }
    }
    Ok(())
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for column in &self.columns {
            write!(f, "{:>8}", column.name)?;
        }
        for (row, label) in self.index.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:<4}", label.to_string())?;
            for column in &self.columns {
                write!(f, "{:>8}", column.values[row].to_string())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(vec![
            ("A", vec![1.into(), 2.into(), 3.into()]),
            ("B", vec!["x".into(), "y".into(), "z".into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_shares_index() {
        let f = frame().tail(2);
        let a = f.column("A").unwrap();
        assert_eq!(a.name(), Some("A"));
        assert_eq!(a.index(), &[Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let err = Frame::new(vec![("A", vec![1.into()]), ("B", vec![])]).unwrap_err();
        assert!(err.is_evaluation());
    }

    #[test]
    fn test_from_records_fills_missing() {
        let f = Frame::from_records(&json!([{"A": 1, "B": 2}, {"A": 3}])).unwrap();
        assert_eq!(f.column_names(), vec!["A", "B"]);
        assert_eq!(f.column("B").unwrap().values()[1], Value::Null);
    }

    #[test]
    fn test_select_and_drop() {
        let f = frame();
        assert_eq!(f.select(&["B".to_string()]).unwrap().column_names(), vec!["B"]);
        assert_eq!(f.drop(&["B".to_string()]).unwrap().column_names(), vec!["A"]);
        assert!(f.select(&["C".to_string()]).is_err());
    }
}
