//! Result rows produced by the execution collaborator.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single result cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// One result row, positionally aligned with [`RowList::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

/// Read-only result set keyed by column alias.
///
/// Cloning is cheap; clones share the same rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowList {
    columns: Arc<Vec<String>>,
    rows: Arc<Vec<Row>>,
}

impl RowList {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns: Arc::new(columns),
            rows: Arc::new(rows),
        }
    }

    pub fn empty(columns: Vec<String>) -> Self {
        Self::new(columns, Vec::new())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column published under `alias`.
    pub fn column_index(&self, alias: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == alias)
    }

    /// Cells of the `alias` column, one per row.
    pub fn column<'a>(&'a self, alias: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let index = self.column_index(alias)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(index).unwrap_or(&Value::Null)),
        )
    }
}
