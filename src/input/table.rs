//! Raw tabular rows as handed over by the loading layer

use serde::Serialize;
use std::collections::HashMap;

/// A single spreadsheet cell before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Objects or arrays that leaked in from structured sources
    Nested(String),
}

const NULL_MARKERS: &[&str] = &["nan", "null", "none"];

impl CellValue {
    /// Infer a typed cell from a delimited-text field, the way a dataframe
    /// reader would: blanks are empty, finite numerics become numbers.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(field.to_string()),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) => CellValue::Nested("array".to_string()),
            Value::Object(_) => CellValue::Nested("object".to_string()),
        }
    }

    /// Missing, null-marker and blank values all count as absent.
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || NULL_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m))
            }
            CellValue::Bool(_) | CellValue::Nested(_) => false,
        }
    }

    /// Trimmed textual rendering of a scalar cell. Whole numbers lose their `.0`.
    pub fn as_text(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        match self {
            CellValue::Text(s) => Some(s.trim().to_string()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Empty | CellValue::Nested(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One data row: header name to cell, plus its 0-based position in the source.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub index: usize,
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: HashMap::new(),
        }
    }

    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.insert(column, value.into());
        self
    }

    /// A repeated column never overwrites a value that is already present.
    pub fn insert(&mut self, column: &str, value: CellValue) {
        match self.cells.get_mut(column) {
            Some(existing) if !existing.is_absent() => {}
            Some(existing) => *existing = value,
            None => {
                self.cells.insert(column.to_string(), value);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.cells.iter()
    }

    /// 1-based position, as shown to users and used in placeholder names
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// A row that was dropped during loading or normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiagnostic {
    pub position: usize,
    pub reason: String,
}

/// Rows read from one source, with the ones that could not be read at all.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub rows: Vec<RawRow>,
    pub skipped: Vec<RowDiagnostic>,
}

impl LoadedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
