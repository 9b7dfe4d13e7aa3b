//! Request dispatcher
//!
//! [`Dashboard`] owns the data source and the schema registry and implements
//! the five table operations (list, new, edit, submit, delete) independently
//! of HTTP. Every operation checks the table name against the registry before
//! touching the data source.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::database::{DataSource, FindQuery};
use crate::pagination::{PageQuery, PageWindow};
use crate::registry::SchemaRegistry;
use crate::render::{self, Fragment, Paths, RenderMode};
use crate::row::{Row, Value};
use crate::schema::TableSchema;
use crate::{DashboardError, Result};

/// Instruction for the client to reload a view after a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    /// URL of the view to reload
    pub location: String,
}

/// The dashboard engine: schema registry plus data source
pub struct Dashboard<DB: DataSource> {
    source: DB,
    registry: SchemaRegistry,
    config: DashboardConfig,
    paths: Paths,
}

impl<DB: DataSource> Dashboard<DB> {
    /// Discover the schema of `source` and build a dashboard over it
    ///
    /// Fails if any table cannot be served, e.g. because it has no primary key,
    /// or if `config` is unusable.
    pub async fn connect(source: DB, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let registry = SchemaRegistry::discover(&source).await?;
        Self::with_registry(source, registry, config)
    }

    /// Build a dashboard over an already validated registry
    pub fn with_registry(
        source: DB,
        registry: SchemaRegistry,
        config: DashboardConfig,
    ) -> Result<Self> {
        config.validate()?;
        let paths = Paths::new(&config.base_path);
        Ok(Self {
            source,
            registry,
            config,
            paths,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn source(&self) -> &DB {
        &self.source
    }

    /// Turn a fragment into a response body for the given mode
    pub fn finish(&self, mode: RenderMode, fragment: Fragment) -> String {
        match mode {
            RenderMode::Partial => fragment.body,
            RenderMode::FullPage => render::render_page(&self.config.title, &self.paths, &fragment),
        }
    }

    /// Welcome page with links to every table
    pub fn index(&self) -> Fragment {
        render::render_index(&self.config.title, &self.paths, self.registry.table_names())
    }

    /// LIST: one page of `table`
    ///
    /// Count and page are fetched concurrently; if either fails the whole
    /// operation fails.
    pub async fn list(&self, table: &str, query: PageQuery) -> Result<Fragment> {
        let schema = self.registry.get(table)?;
        let (offset, limit) = query.resolve(self.config.default_limit)?;

        let (total_count, rows) = tokio::try_join!(
            self.source.count(&schema.name),
            self.source.find(&schema.name, FindQuery::Page { offset, limit }),
        )?;
        debug!(table = %schema.name, offset, limit, total_count, "listing rows");

        let rows: Vec<Row> = rows.into_iter().map(|row| row.conform(schema)).collect();
        let window = PageWindow {
            offset,
            limit,
            total_count,
            returned_count: rows.len() as u64,
        };
        let table_names: Vec<&str> = self.registry.table_names().collect();

        Ok(render::render_table(&self.paths, &table_names, schema, &rows, &window))
    }

    /// NEW: empty form for `table`
    pub fn new_form(&self, table: &str) -> Result<Fragment> {
        let schema = self.registry.get(table)?;
        let title = format!("Add a new entry to \"{}\"", schema.name);

        Ok(render::render_form(&self.paths, schema, None, &title, "Create"))
    }

    /// EDIT: form pre-filled with the row whose primary key is `id`
    pub async fn edit_form(&self, table: &str, id: &str) -> Result<Fragment> {
        let schema = self.registry.get(table)?;
        let (_, row) = self.find_by_id(schema, id).await?;
        let title = format!("Edit entry {} of \"{}\"", id, schema.name);

        Ok(render::render_form(&self.paths, schema, Some(&row), &title, "Save"))
    }

    /// SUBMIT: insert or update a row built from form fields
    pub async fn submit(&self, table: &str, fields: &HashMap<String, String>) -> Result<Refresh> {
        let schema = self.registry.get(table)?;
        let row = Row::from_form(schema, fields)?;

        let stored = self
            .source
            .save(&schema.name, &schema.primary_key, row)
            .await?
            .conform(schema);
        let id = stored.get(&schema.primary_key).cloned().unwrap_or(Value::Null);
        info!(table = %schema.name, id = %id, "row saved");

        Ok(self.refresh(schema))
    }

    /// DELETE: remove the row whose primary key is `id`
    ///
    /// The row is looked up first; a missing row is reported as not found
    /// and no delete is issued.
    pub async fn delete(&self, table: &str, id: &str) -> Result<Refresh> {
        let schema = self.registry.get(table)?;
        let (key, _) = self.find_by_id(schema, id).await?;

        let deleted = self
            .source
            .delete(&schema.name, &schema.primary_key, &key)
            .await?;
        info!(table = %schema.name, id = %key, deleted, "row deleted");

        Ok(self.refresh(schema))
    }

    fn refresh(&self, schema: &TableSchema) -> Refresh {
        Refresh {
            location: self.paths.table(&schema.name),
        }
    }

    /// Look up a row by primary key, returning the parsed key with it
    async fn find_by_id(&self, schema: &TableSchema, id: &str) -> Result<(Value, Row)> {
        let not_found = || DashboardError::NotFound(format!("row {} in table {}", id, schema.name));

        // An id that cannot be a value of the key column names no row.
        let key = match Value::parse(Some(id), schema.primary_key_type()) {
            Ok(key) if !key.is_null() => key,
            _ => return Err(not_found()),
        };

        let rows = self
            .source
            .find(
                &schema.name,
                FindQuery::Where {
                    column: schema.primary_key.clone(),
                    equals: key.clone(),
                },
            )
            .await?;

        let row = rows.into_iter().next().ok_or_else(not_found)?;
        Ok((key, row.conform(schema)))
    }
}
