//! Schema registry
//!
//! The registry is built once, before the router exists, from the metadata a
//! [`DataSource`] reports. Every table is validated up front so that a
//! schema the dashboard cannot handle stops startup instead of failing a
//! request later.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

use crate::database::DataSource;
use crate::schema::{ColumnSchema, Relation, SemanticType, TableInfo, TableSchema};
use crate::DashboardError;

/// Reasons a discovered table cannot be served
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("table {0} has no columns")]
    NoColumns(String),

    #[error("table {0} has no primary key column")]
    MissingPrimaryKey(String),

    #[error("table {table} has a composite primary key ({columns})")]
    CompositePrimaryKey { table: String, columns: String },

    #[error("table {table}: foreign key column {column} does not exist")]
    UnknownRelationColumn { table: String, column: String },

    #[error("table {0} was reported twice")]
    DuplicateTable(String),
}

/// Immutable set of table schemas, keyed by table name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// Discover and validate every table of `source`
    pub async fn discover<DB: DataSource>(source: &DB) -> Result<Self, DashboardError> {
        let tables = source.describe_tables().await?;
        let registry = Self::from_tables(tables)?;

        info!(tables = registry.tables.len(), "schema registry built");
        Ok(registry)
    }

    /// Validate raw table metadata into a registry
    pub fn from_tables(tables: Vec<TableInfo>) -> Result<Self, SchemaError> {
        let mut registry = BTreeMap::new();

        for table in tables {
            let schema = normalize(table)?;
            if registry.contains_key(&schema.name) {
                return Err(SchemaError::DuplicateTable(schema.name));
            }
            registry.insert(schema.name.clone(), schema);
        }

        Ok(Self { tables: registry })
    }

    /// All tables, ordered by name
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Table names, ordered
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Look up a table, failing with `NotFound` for unknown names
    pub fn get(&self, name: &str) -> Result<&TableSchema, DashboardError> {
        self.tables
            .get(name)
            .ok_or_else(|| DashboardError::NotFound(format!("table {}", name)))
    }
}

fn normalize(table: TableInfo) -> Result<TableSchema, SchemaError> {
    if table.columns.is_empty() {
        return Err(SchemaError::NoColumns(table.name));
    }

    let key_columns: Vec<&str> = table
        .columns
        .iter()
        .filter(|column| column.is_primary_key)
        .map(|column| column.name.as_str())
        .collect();
    let primary_key = match key_columns.as_slice() {
        [] => return Err(SchemaError::MissingPrimaryKey(table.name.clone())),
        [column] => column.to_string(),
        columns => {
            return Err(SchemaError::CompositePrimaryKey {
                columns: columns.join(", "),
                table: table.name.clone(),
            })
        }
    };

    let mut relations = Vec::with_capacity(table.foreign_keys.len());
    for foreign_key in &table.foreign_keys {
        if !table.columns.iter().any(|column| column.name == foreign_key.column) {
            return Err(SchemaError::UnknownRelationColumn {
                table: table.name.clone(),
                column: foreign_key.column.clone(),
            });
        }
        // A column may carry several constraints; the first one wins.
        if relations
            .iter()
            .any(|relation: &Relation| relation.local_column == foreign_key.column)
        {
            continue;
        }
        relations.push(Relation {
            local_column: foreign_key.column.clone(),
            foreign_table: foreign_key.references_table.clone(),
        });
    }

    let columns = table
        .columns
        .iter()
        .map(|column| ColumnSchema {
            name: column.name.clone(),
            semantic_type: SemanticType::from_sql_type(&column.data_type),
            is_foreign_key: relations
                .iter()
                .any(|relation| relation.local_column == column.name),
            is_primary_key: column.name == primary_key,
        })
        .collect();

    Ok(TableSchema {
        name: table.name,
        columns,
        primary_key,
        relations,
    })
}
