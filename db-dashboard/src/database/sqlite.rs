//! SQLite data source implementation

use crate::database::traits::{DataSource, DatabaseError, FindQuery};
use crate::row::{Row, Value};
use crate::schema::{ColumnInfo, ForeignKey, TableInfo};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

/// SQLite data source
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Quote an identifier (table or column name) to prevent SQL injection
    ///
    /// SQLite uses double quotes for identifiers. This function escapes any
    /// double quotes in the identifier by doubling them.
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Convert a SQLite row to a dashboard row, keeping result column order
    fn row_from_sqlite(row: &SqliteRow) -> Result<Row, DatabaseError> {
        let mut converted = Row::new();

        for (index, column) in row.columns().iter().enumerate() {
            let value = Self::extract_column_value(row, index)?;
            converted.insert(column.name(), value);
        }

        Ok(converted)
    }

    /// Extract a column value using the storage class of the stored value
    ///
    /// SQLite is dynamically typed, so the declared column type is not a
    /// reliable guide; the value's own class is.
    fn extract_column_value(row: &SqliteRow, index: usize) -> Result<Value, DatabaseError> {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        let storage_class = raw.type_info().name().to_string();

        let value = match storage_class.as_str() {
            "INTEGER" => Value::Integer(row.try_get::<i64, _>(index)?),
            "REAL" => Value::Real(row.try_get::<f64, _>(index)?),
            "BLOB" => {
                let bytes = row.try_get::<Vec<u8>, _>(index)?;
                Value::Blob { bytes: bytes.len() }
            }
            _ => Value::Text(row.try_get::<String, _>(index)?),
        };

        Ok(value)
    }

    /// Bind a dashboard value to a positional parameter
    fn bind_value<'q>(
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        value: &Value,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match value {
            Value::Null => query.bind(None::<String>),
            Value::Bool(flag) => query.bind(*flag),
            Value::Integer(number) => query.bind(*number),
            Value::Real(number) => query.bind(*number),
            Value::Text(text) => query.bind(text.clone()),
            // Only the size is known, so a blob matches nothing.
            Value::Blob { .. } => query.bind(None::<Vec<u8>>),
        }
    }

    /// Build the INSERT (or upsert) statement used by `save`
    ///
    /// `columns` are the non-null columns being written, in bind order.
    /// `cleared` are columns submitted empty: an insert leaves them to their
    /// defaults, an update sets them to NULL.
    fn build_save_statement(
        table: &str,
        primary_key: &str,
        columns: &[&str],
        cleared: &[&str],
        has_key: bool,
    ) -> String {
        let quoted_table = Self::quote_identifier(table);

        if columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES RETURNING *", quoted_table);
        }

        let column_list = columns
            .iter()
            .map(|column| Self::quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        let mut statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted_table, column_list, placeholders
        );

        if has_key {
            let mut assignments: Vec<String> = columns
                .iter()
                .filter(|column| **column != primary_key)
                .map(|column| {
                    let quoted = Self::quote_identifier(column);
                    format!("{} = excluded.{}", quoted, quoted)
                })
                .chain(
                    cleared
                        .iter()
                        .map(|column| format!("{} = NULL", Self::quote_identifier(column))),
                )
                .collect();
            if assignments.is_empty() {
                let quoted = Self::quote_identifier(primary_key);
                assignments.push(format!("{} = excluded.{}", quoted, quoted));
            }

            statement.push_str(&format!(
                " ON CONFLICT({}) DO UPDATE SET {}",
                Self::quote_identifier(primary_key),
                assignments.join(", ")
            ));
        }

        statement.push_str(" RETURNING *");
        statement
    }

    async fn describe_table(&self, table: &str) -> Result<TableInfo, DatabaseError> {
        // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
        let table_info_query = format!("PRAGMA table_info({})", Self::quote_identifier(table));
        let column_rows = sqlx::query(&table_info_query)
            .fetch_all(&self.pool)
            .await?;

        if column_rows.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        let mut columns = Vec::with_capacity(column_rows.len());
        for row in column_rows {
            let name: String = row.try_get("name")?;
            let data_type: String = row.try_get("type")?;
            let not_null: i32 = row.try_get("notnull")?;
            let primary_key: i32 = row.try_get("pk")?;

            columns.push(ColumnInfo {
                name,
                data_type,
                nullable: not_null == 0,
                is_primary_key: primary_key > 0,
            });
        }

        // PRAGMA foreign_key_list returns: id, seq, table, from, to, on_update, on_delete, match
        let foreign_key_query =
            format!("PRAGMA foreign_key_list({})", Self::quote_identifier(table));
        let foreign_key_rows = sqlx::query(&foreign_key_query)
            .fetch_all(&self.pool)
            .await?;

        let mut foreign_keys = Vec::with_capacity(foreign_key_rows.len());
        for row in foreign_key_rows {
            // "to" is NULL when the reference targets the parent's primary key implicitly
            let references_column: Option<String> = row.try_get("to")?;
            foreign_keys.push(ForeignKey {
                column: row.try_get("from")?,
                references_table: row.try_get("table")?,
                references_column: references_column.unwrap_or_default(),
            });
        }

        Ok(TableInfo {
            name: table.to_string(),
            columns,
            foreign_keys,
        })
    }
}

#[async_trait]
impl DataSource for SqliteProvider {
    async fn describe_tables(&self) -> Result<Vec<TableInfo>, DatabaseError> {
        let query = "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("name")?;
            tables.push(self.describe_table(&name).await?);
        }

        Ok(tables)
    }

    async fn count(&self, table: &str) -> Result<u64, DatabaseError> {
        let count_query = format!("SELECT COUNT(*) FROM {}", Self::quote_identifier(table));
        let count: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn find(&self, table: &str, query: FindQuery) -> Result<Vec<Row>, DatabaseError> {
        let quoted_table = Self::quote_identifier(table);

        let rows = match query {
            FindQuery::Page { offset, limit } => {
                let select_query = format!("SELECT * FROM {} LIMIT ? OFFSET ?", quoted_table);
                sqlx::query(&select_query)
                    .bind(limit as i64)
                    .bind(offset as i64)
                    .fetch_all(&self.pool)
                    .await?
            }
            FindQuery::Where { column, equals } => {
                let select_query = format!(
                    "SELECT * FROM {} WHERE {} = ?",
                    quoted_table,
                    Self::quote_identifier(&column)
                );
                Self::bind_value(sqlx::query(&select_query), &equals)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.iter().map(Self::row_from_sqlite).collect()
    }

    async fn save(&self, table: &str, primary_key: &str, row: Row) -> Result<Row, DatabaseError> {
        let written: Vec<(&str, &Value)> = row
            .iter()
            .filter(|(_, value)| !value.is_null() && !matches!(value, Value::Blob { .. }))
            .collect();
        let columns: Vec<&str> = written.iter().map(|(column, _)| *column).collect();
        let cleared: Vec<&str> = row
            .iter()
            .filter(|(column, value)| value.is_null() && *column != primary_key)
            .map(|(column, _)| column)
            .collect();
        let has_key = columns.contains(&primary_key);

        let statement = Self::build_save_statement(table, primary_key, &columns, &cleared, has_key);
        let mut query = sqlx::query(&statement);
        for (_, value) in &written {
            query = Self::bind_value(query, value);
        }

        match query.fetch_optional(&self.pool).await? {
            Some(stored) => Self::row_from_sqlite(&stored),
            None => Err(DatabaseError::NothingWritten(table.to_string())),
        }
    }

    async fn delete(&self, table: &str, column: &str, equals: &Value) -> Result<u64, DatabaseError> {
        let delete_query = format!(
            "DELETE FROM {} WHERE {} = ?",
            Self::quote_identifier(table),
            Self::quote_identifier(column)
        );
        let result = Self::bind_value(sqlx::query(&delete_query), equals)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
