//! Schema types for dynamic database introspection
//!
//! Two layers live here. [`TableInfo`] and friends are the raw metadata a
//! [`DataSource`](crate::database::DataSource) reports. [`TableSchema`] is the
//! normalized, validated view the renderers work from: exactly one primary key
//! column, a semantic type per column, and resolved relations.

use serde::{Deserialize, Serialize};

/// Raw table metadata as discovered by a data source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    /// Name of the table
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnInfo>,

    /// Foreign key constraints
    pub foreign_keys: Vec<ForeignKey>,
}

/// Raw information about a single column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name
    pub name: String,

    /// Declared SQL data type (e.g., "INTEGER", "TEXT", "VARCHAR(255)")
    pub data_type: String,

    /// Whether the column allows NULL values
    pub nullable: bool,

    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
}

/// Foreign key constraint information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Column name in this table
    pub column: String,

    /// Referenced table name
    pub references_table: String,

    /// Referenced column name
    pub references_column: String,
}

/// Semantic type of a column, derived from its declared SQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticType {
    String,
    Integer,
    Real,
    Boolean,
    Other,
}

impl SemanticType {
    /// Classify a declared SQL type using SQLite's affinity rules
    ///
    /// `BOOL` is checked before `INT` so that declarations such as `BOOLEAN`
    /// are not swallowed by the integer rule.
    pub fn from_sql_type(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();

        if upper.contains("BOOL") {
            SemanticType::Boolean
        } else if upper.contains("INT") {
            SemanticType::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            SemanticType::String
        } else if ["REAL", "FLOA", "DOUB", "NUMERIC", "DECIMAL"]
            .iter()
            .any(|affinity| upper.contains(affinity))
        {
            SemanticType::Real
        } else {
            SemanticType::Other
        }
    }
}

/// Normalized description of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    pub semantic_type: SemanticType,
    pub is_foreign_key: bool,
    pub is_primary_key: bool,
}

/// A foreign key column resolved to the table it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub local_column: String,
    pub foreign_table: String,
}

/// Validated, immutable schema of one table
///
/// Built once by the [`SchemaRegistry`](crate::registry::SchemaRegistry) at
/// startup. Columns are never empty and `primary_key` always names one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub primary_key: String,
    pub relations: Vec<Relation>,
}

impl TableSchema {
    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Semantic type of the primary key column
    pub fn primary_key_type(&self) -> SemanticType {
        self.column(&self.primary_key)
            .map(|column| column.semantic_type)
            .unwrap_or(SemanticType::Other)
    }

    /// The relation declared for a foreign key column, if any
    pub fn relation_for(&self, column: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|relation| relation.local_column == column)
    }
}
