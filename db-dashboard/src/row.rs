//! Scalar values and rows
//!
//! A [`Row`] is an ordered mapping from column name to [`Value`]. Rows coming
//! from a form or from the database pass through [`Row::from_form`] or
//! [`Row::conform`], which are the only places where loosely typed input is
//! interpreted against a [`TableSchema`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::schema::{SemanticType, TableSchema};
use crate::DashboardError;

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// Stored binary data, known only by its size; never written back
    Blob { bytes: usize },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Parse submitted text into a value of the given semantic type
    ///
    /// Empty input is null for every type except boolean, where the checkbox
    /// contract applies: absent or empty means unchecked.
    pub fn parse(raw: Option<&str>, semantic_type: SemanticType) -> Result<Value, String> {
        if semantic_type == SemanticType::Boolean {
            return parse_checkbox(raw).map(Value::Bool);
        }

        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Value::Null),
        };

        match semantic_type {
            SemanticType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| format!("'{}' is not an integer", raw)),
            SemanticType::Real => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Value::Real)
                .ok_or_else(|| format!("'{}' is not a number", raw)),
            _ => Ok(Value::Text(raw.to_string())),
        }
    }

    /// Reinterpret a stored value according to the column's semantic type
    ///
    /// SQLite reports booleans as 0/1 integers and may hand back integral
    /// reals; these are folded into the column's declared shape.
    pub fn conform(self, semantic_type: SemanticType) -> Value {
        match (semantic_type, self) {
            (SemanticType::Boolean, Value::Integer(number)) => Value::Bool(number != 0),
            (SemanticType::Boolean, Value::Text(text)) => match parse_checkbox(Some(&text)) {
                Ok(flag) => Value::Bool(flag),
                Err(_) => Value::Text(text),
            },
            (SemanticType::Real, Value::Integer(number)) => Value::Real(number as f64),
            (_, value) => value,
        }
    }
}

impl fmt::Display for Value {
    /// Text used both for table cells and for pre-filled form inputs
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(flag) => write!(formatter, "{}", flag),
            Value::Integer(number) => write!(formatter, "{}", number),
            Value::Real(number) => write!(formatter, "{}", number),
            Value::Text(text) => formatter.write_str(text),
            Value::Blob { bytes } => write!(formatter, "[BLOB: {} bytes]", bytes),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(integer) => Value::Integer(integer),
                None => Value::Real(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(text) => Value::Text(text),
            nested => Value::Text(nested.to_string()),
        }
    }
}

fn parse_checkbox(raw: Option<&str>) -> Result<bool, String> {
    match raw.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") | Some("off") => Ok(false),
        Some("true") | Some("1") | Some("on") => Ok(true),
        Some(other) => Err(format!("'{}' is not a boolean", other)),
    }
}

/// One table row, ordered by schema column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Iterate over `(column, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a row from submitted form fields
    ///
    /// Only columns of `schema` are read and unknown fields are ignored. An
    /// empty field is null. A missing field is left out of the row, so the
    /// stored value is kept; boolean columns are the exception, where a
    /// missing field is an unchecked box.
    pub fn from_form(
        schema: &TableSchema,
        fields: &HashMap<String, String>,
    ) -> Result<Row, DashboardError> {
        let mut row = Row::new();

        for column in &schema.columns {
            let raw = fields.get(&column.name).map(String::as_str);
            if raw.is_none() && column.semantic_type != SemanticType::Boolean {
                continue;
            }
            let value = Value::parse(raw, column.semantic_type).map_err(|message| {
                DashboardError::Validation(format!("column '{}': {}", column.name, message))
            })?;
            row.insert(column.name.clone(), value);
        }

        Ok(row)
    }

    /// Reorder and retype a row read from the data layer to match `schema`
    ///
    /// Columns the data layer returned that the schema does not know are
    /// dropped; schema columns it did not return are null.
    pub fn conform(mut self, schema: &TableSchema) -> Row {
        let mut row = Row::new();

        for column in &schema.columns {
            let value = self
                .values
                .swap_remove(&column.name)
                .unwrap_or(Value::Null)
                .conform(column.semantic_type);
            row.insert(column.name.clone(), value);
        }

        row
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
