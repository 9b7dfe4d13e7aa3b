//! Shared fixtures: an in-memory data source that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use db_dashboard::{
    ColumnInfo, DataSource, DatabaseError, FindQuery, ForeignKey, Row, TableInfo, Value,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory tables with a log of data-layer calls
pub struct MemorySource {
    tables: Vec<TableInfo>,
    rows: Mutex<HashMap<String, Vec<Row>>>,
    calls: Mutex<Vec<String>>,
    fail_counts: AtomicBool,
}

impl MemorySource {
    pub fn new(tables: Vec<TableInfo>) -> Self {
        Self {
            tables,
            rows: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_counts: AtomicBool::new(false),
        }
    }

    /// `users` with 25 rows and `orders` pointing at them
    pub fn users_and_orders() -> Self {
        let source = Self::new(vec![users_table(), orders_table()]);

        for id in 1..=25 {
            source.insert(
                "users",
                row(&[
                    ("id", Value::Integer(id)),
                    ("name", Value::Text(format!("User {}", id))),
                    ("score", Value::Real(id as f64 / 2.0)),
                    ("is_active", Value::Bool(id % 2 == 0)),
                ]),
            );
        }
        source.insert(
            "orders",
            row(&[
                ("id", Value::Integer(1)),
                ("user_id", Value::Integer(7)),
                ("quantity", Value::Integer(3)),
            ]),
        );

        source
    }

    pub fn insert(&self, table: &str, row: Row) {
        self.rows
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.rows
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Data-layer calls made so far, as `operation:table`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_counts(&self) {
        self.fail_counts.store(true, Ordering::SeqCst);
    }

    fn record(&self, operation: &str, table: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, table));
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn describe_tables(&self) -> Result<Vec<TableInfo>, DatabaseError> {
        Ok(self.tables.clone())
    }

    async fn count(&self, table: &str) -> Result<u64, DatabaseError> {
        self.record("count", table);
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(DatabaseError::Query("connection lost".to_string()));
        }
        Ok(self.rows(table).len() as u64)
    }

    async fn find(&self, table: &str, query: FindQuery) -> Result<Vec<Row>, DatabaseError> {
        self.record("find", table);
        let rows = self.rows(table);

        Ok(match query {
            FindQuery::Page { offset, limit } => rows
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
            FindQuery::Where { column, equals } => rows
                .into_iter()
                .filter(|row| row.get(&column) == Some(&equals))
                .collect(),
        })
    }

    async fn save(&self, table: &str, primary_key: &str, mut row: Row) -> Result<Row, DatabaseError> {
        self.record("save", table);
        let mut tables = self.rows.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        if row.get(primary_key).map_or(true, Value::is_null) {
            let next_id = rows
                .iter()
                .filter_map(|existing| match existing.get(primary_key) {
                    Some(Value::Integer(id)) => Some(*id),
                    _ => None,
                })
                .max()
                .unwrap_or(0)
                + 1;
            row.insert(primary_key, Value::Integer(next_id));
        }

        // Like an upsert: submitted columns overwrite, the others are kept.
        let key = row.get(primary_key).cloned();
        match rows
            .iter_mut()
            .find(|existing| existing.get(primary_key).cloned() == key)
        {
            Some(existing) => {
                for (column, value) in row.iter() {
                    existing.insert(column, value.clone());
                }
                Ok(existing.clone())
            }
            None => {
                rows.push(row.clone());
                Ok(row)
            }
        }
    }

    async fn delete(&self, table: &str, column: &str, equals: &Value) -> Result<u64, DatabaseError> {
        self.record("delete", table);
        let mut tables = self.rows.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        let before = rows.len();
        rows.retain(|row| row.get(column) != Some(equals));
        Ok((before - rows.len()) as u64)
    }
}

pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect()
}

fn column(name: &str, data_type: &str, is_primary_key: bool) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable: !is_primary_key,
        is_primary_key,
    }
}

pub fn users_table() -> TableInfo {
    TableInfo {
        name: "users".to_string(),
        columns: vec![
            column("id", "INTEGER", true),
            column("name", "TEXT", false),
            column("score", "REAL", false),
            column("is_active", "BOOLEAN", false),
        ],
        foreign_keys: Vec::new(),
    }
}

pub fn orders_table() -> TableInfo {
    TableInfo {
        name: "orders".to_string(),
        columns: vec![
            column("id", "INTEGER", true),
            column("user_id", "INTEGER", false),
            column("quantity", "INTEGER", false),
        ],
        foreign_keys: vec![ForeignKey {
            column: "user_id".to_string(),
            references_table: "users".to_string(),
            references_column: "id".to_string(),
        }],
    }
}

/// The fields a browser would submit for a rendered form
///
/// Text and number inputs submit their value; checkboxes submit their value
/// only when checked.
pub fn submitted_fields(form: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for tag in form.split("<input ").skip(1) {
        let tag = &tag[..tag.find("/>").unwrap_or(tag.len())];
        let Some(name) = attribute(tag, "name") else {
            continue;
        };
        let value = attribute(tag, "value").unwrap_or_default();

        if attribute(tag, "type").as_deref() == Some("checkbox") {
            if tag.split_whitespace().any(|word| word == "checked") {
                fields.insert(name, value);
            }
        } else {
            fields.insert(name, value);
        }
    }

    fields
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let marker = format!(" {}=\"", name);
    let padded = format!(" {}", tag);
    let start = padded.find(&marker)? + marker.len();
    let end = padded[start..].find('"')? + start;
    Some(unescape(&padded[start..end]))
}

fn unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
