//! DashboardLayer - Main Axum integration layer
//!
//! This module provides the main entry point for integrating the dashboard
//! into an Axum application.

use crate::config::DashboardConfig;
use crate::database::DataSource;
use crate::dispatcher::Dashboard;
use crate::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[cfg(feature = "sqlite")]
use crate::database::sqlite::SqliteProvider;

use crate::api::{
    delete_row_handler, edit_row_handler, index_handler, list_rows_handler, new_row_handler,
    save_row_handler,
};

/// Main layer for integrating the dashboard into an Axum application
///
/// Construction discovers and validates the schema, so by the time a router
/// exists every table it serves is known.
///
/// # Example
///
/// ```rust,no_run
/// use axum::Router;
/// use db_dashboard::{DashboardConfig, DashboardLayer};
/// use sqlx::SqlitePool;
///
/// # async fn example() {
/// let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
/// let dashboard = DashboardLayer::sqlite(pool, DashboardConfig::default()).await.unwrap();
/// let app = Router::new().merge(dashboard.into_router());
/// # }
/// ```
pub struct DashboardLayer<DB: DataSource> {
    dashboard: Arc<Dashboard<DB>>,
}

impl<DB: DataSource> DashboardLayer<DB> {
    /// Discover the schema of `source` and prepare the dashboard
    ///
    /// # Arguments
    ///
    /// * `source` - The data source implementation
    /// * `config` - Mount path, title and page size
    pub async fn new(source: DB, config: DashboardConfig) -> Result<Self> {
        let dashboard = Dashboard::connect(source, config).await?;
        Ok(Self::from_dashboard(dashboard))
    }

    /// Wrap an already built dashboard
    pub fn from_dashboard(dashboard: Dashboard<DB>) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }

    pub fn dashboard(&self) -> &Dashboard<DB> {
        &self.dashboard
    }

    /// Convert into an Axum Router that can be merged
    ///
    /// The returned router includes, under the configured base path:
    /// - `GET /` welcome page
    /// - `GET /tables/{table}` list view
    /// - `GET /tables/{table}/new` create form
    /// - `GET /tables/{table}/{id}` edit form
    /// - `POST /tables/{table}` save a row
    /// - `DELETE /tables/{table}/{id}` delete a row
    /// - Request tracing and permissive CORS middleware for development
    pub fn into_router(self) -> Router {
        let base_path = self
            .dashboard
            .config()
            .base_path
            .trim_end_matches('/')
            .to_string();

        // Note: Axum 0.8 uses {param} syntax instead of :param
        let routes = Router::new()
            .route("/", get(index_handler::<DB>))
            .route(
                "/tables/{table}",
                get(list_rows_handler::<DB>).post(save_row_handler::<DB>),
            )
            .route("/tables/{table}/new", get(new_row_handler::<DB>))
            .route(
                "/tables/{table}/{id}",
                get(edit_row_handler::<DB>).delete(delete_row_handler::<DB>),
            )
            .with_state(self.dashboard);

        // Axum refuses to nest at the root
        let router = if base_path.is_empty() {
            routes
        } else {
            Router::new().nest(&base_path, routes)
        };

        router
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }
}

#[cfg(feature = "sqlite")]
impl DashboardLayer<SqliteProvider> {
    /// Create a dashboard for SQLite
    ///
    /// # Arguments
    ///
    /// * `pool` - The SQLite connection pool
    /// * `config` - Mount path, title and page size
    pub async fn sqlite(pool: sqlx::SqlitePool, config: DashboardConfig) -> Result<Self> {
        Self::new(SqliteProvider::new(pool), config).await
    }
}
