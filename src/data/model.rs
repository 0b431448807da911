use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SplitError;

/// Cell texts read as missing, the default `na_values` of `pandas.read_csv`.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common Pandas dtypes.
///
/// Target values are used as class keys during stratification, so `Value`
/// is totally ordered and hashable. Floats compare with `total_cmp`.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Value {
    /// Infer the type of a raw text cell: integer, float, bool, then string.
    /// Empty cells and NA markers such as `NaN` become [`Value::Null`].
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if NA_TOKENS.contains(&s) {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        if s == "true" || s == "false" {
            return Value::Bool(s == "true");
        }
        Value::String(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// -- Manual Eq/Ord so Value can key a BTreeMap of classes --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "NaN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset / feature matrix
// ---------------------------------------------------------------------------

/// An in-memory table: named columns, row-major cells and a row index.
///
/// `index[i]` is the position row `i` had in the source file, so rows can be
/// traced back after a split the same way a DataFrame index can.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub index: Vec<usize>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table whose index is the natural row order `0..n`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let index = (0..rows.len()).collect();
        Table {
            columns,
            index,
            rows,
        }
    }

    /// Give every numeric column a single dtype.
    ///
    /// A column holding only numbers and nulls, with at least one float or
    /// null among its integers, is stored as floats throughout, so `5` and
    /// `5.0` land in the same class.
    pub fn unify_numeric_columns(&mut self) {
        for c in 0..self.columns.len() {
            let mut has_int = false;
            let mut needs_float = false;
            let mut numeric = true;
            for row in &self.rows {
                match row.get(c) {
                    Some(Value::Integer(_)) => has_int = true,
                    Some(Value::Float(_)) | Some(Value::Null) | None => needs_float = true,
                    Some(_) => numeric = false,
                }
            }
            if !(has_int && needs_float && numeric) {
                continue;
            }
            for row in &mut self.rows {
                if let Some(cell) = row.get_mut(c) {
                    if let Value::Integer(i) = *cell {
                        *cell = Value::Float(i as f64);
                    }
                }
            }
        }
    }

    /// `(rows, columns)`, like `DataFrame.shape`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy one column out of the table.
    pub fn column(&self, name: &str) -> Option<Column> {
        let pos = self.column_position(name)?;
        Some(Column {
            name: name.to_string(),
            index: self.index.clone(),
            values: self.rows.iter().map(|row| row[pos].clone()).collect(),
        })
    }

    /// Separate `name` from the rest of the table.
    ///
    /// Returns the remaining columns as the feature matrix and the removed
    /// column as the target. Both keep this table's index and row order.
    pub fn split_off(self, name: &str) -> Result<(Table, Column), SplitError> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| SplitError::MissingColumn(name.to_string()))?;

        let mut columns = self.columns;
        columns.remove(pos);

        let mut values = Vec::with_capacity(self.rows.len());
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                values.push(row.remove(pos));
                row
            })
            .collect();

        let target = Column {
            name: name.to_string(),
            index: self.index.clone(),
            values,
        };
        let features = Table {
            columns,
            index: self.index,
            rows,
        };
        Ok((features, target))
    }

    /// Select rows by position, in the order given.
    pub fn take(&self, positions: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            index: positions.iter().map(|&p| self.index[p]).collect(),
            rows: positions.iter().map(|&p| self.rows[p].clone()).collect(),
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let positions: Vec<usize> = (0..n.min(self.len())).collect();
        self.take(&positions)
    }
}

/// Right-aligned text rendering with the row index on the left.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        let labels: Vec<String> = self.index.iter().map(|i| i.to_string()).collect();

        let index_width = labels.iter().map(String::len).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| {
                cells
                    .iter()
                    .map(|row| row[c].len())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {name:>width$}")?;
        }
        for (label, row) in labels.iter().zip(&cells) {
            writeln!(f)?;
            write!(f, "{label:<index_width$}")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Column – the target vector
// ---------------------------------------------------------------------------

/// A single named column with its row index, like a Pandas `Series`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub index: Vec<usize>,
    pub values: Vec<Value>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Select values by position, in the order given.
    pub fn take(&self, positions: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            index: positions.iter().map(|&p| self.index[p]).collect(),
            values: positions.iter().map(|&p| self.values[p].clone()).collect(),
        }
    }

    /// Number of occurrences of each distinct value, in value order.
    pub fn value_counts(&self) -> BTreeMap<Value, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.values {
            *counts.entry(v.clone()).or_insert(0) += 1;
        }
        counts
    }
}
