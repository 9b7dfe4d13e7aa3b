//! Data source trait
//!
//! This trait defines the interface the dashboard needs from a database: schema
//! metadata plus count/find/save/delete per table.

use crate::row::{Row, Value};
use crate::schema::TableInfo;
use async_trait::async_trait;
use thiserror::Error;

/// Row selection for [`DataSource::find`]
#[derive(Debug, Clone, PartialEq)]
pub enum FindQuery {
    /// Unfiltered page of rows
    Page { offset: u64, limit: u64 },

    /// Rows whose `column` equals `equals`
    Where { column: String, equals: Value },
}

/// Data source trait for schema discovery and row persistence
///
/// Implementations report table metadata once at startup and then serve
/// per-request reads and writes. Table and column names passed in have always
/// been checked against the discovered schema first.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    /// Describe all user tables
    ///
    /// # Returns
    ///
    /// Raw table metadata: columns in declaration order, primary key flags,
    /// and foreign keys
    async fn describe_tables(&self) -> Result<Vec<TableInfo>, DatabaseError>;

    /// Total number of rows in a table
    async fn count(&self, table: &str) -> Result<u64, DatabaseError>;

    /// Fetch rows from a table
    ///
    /// # Arguments
    ///
    /// * `table` - Name of the table
    /// * `query` - Either a page window or a column equality filter
    async fn find(&self, table: &str, query: FindQuery) -> Result<Vec<Row>, DatabaseError>;

    /// Insert or update a row
    ///
    /// A null value for `primary_key` inserts a new row; otherwise the row with
    /// that key is inserted or updated. Null values are left out of the write
    /// so that column defaults apply.
    ///
    /// # Returns
    ///
    /// The row as stored
    async fn save(&self, table: &str, primary_key: &str, row: Row) -> Result<Row, DatabaseError>;

    /// Delete rows whose `column` equals `equals`
    ///
    /// # Returns
    ///
    /// Number of rows deleted
    async fn delete(&self, table: &str, column: &str, equals: &Value) -> Result<u64, DatabaseError>;
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Generic database error
    #[error("Database error: {0}")]
    Query(String),

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Write produced no row
    #[error("Write to {0} returned no row")]
    NothingWritten(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::Query(error.to_string())
    }
}
