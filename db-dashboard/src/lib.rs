//! # db-dashboard
//!
//! A generated administration dashboard for SQL databases, mountable as an Axum router.
//!
//! ## Features
//!
//! - Schema discovery: every table with a primary key gets a dashboard, no per-table code
//! - Paginated list views with links along foreign keys
//! - Create, edit and delete forms with input widgets chosen from column types
//! - htmx partial-page updates, with full pages for direct navigation
//! - SQLite support out of the box, other databases through [`DataSource`]
//!
//! ## Security Warning
//!
//! **This is a development tool only!**
//!
//! - No authentication/authorization built-in
//! - Exposes full read and write access to every discovered table
//! - Should never be exposed in production or public networks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use db_dashboard::{DashboardConfig, DashboardLayer};
//! use sqlx::SqlitePool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = SqlitePool::connect("sqlite::memory:")
//!         .await
//!         .unwrap();
//!
//!     // The schema is discovered here, before any request can be served.
//!     let dashboard = DashboardLayer::sqlite(pool, DashboardConfig::default().with_base_path("/admin"))
//!         .await
//!         .unwrap();
//!
//!     let app = Router::new()
//!         .route("/", get(|| async { "Hello, World!" }))
//!         .merge(dashboard.into_router());
//!
//!     // Serve the application...
//! }
//! ```

// Public modules
pub mod api;
pub mod config;
pub mod database;
pub mod dispatcher;
pub mod layer;
pub mod pagination;
pub mod registry;
pub mod render;
pub mod row;
pub mod schema;
pub mod widget;

// Public exports
pub use config::DashboardConfig;
pub use dispatcher::{Dashboard, Refresh};
pub use layer::DashboardLayer;
pub use pagination::{compute_window, PageQuery, PageWindow};
pub use registry::{SchemaError, SchemaRegistry};
pub use row::{Row, Value};
pub use schema::{ColumnInfo, ColumnSchema, ForeignKey, Relation, SemanticType, TableInfo, TableSchema};
pub use widget::{widget_for, Widget};

// Re-export data sources
pub use database::traits::{DataSource, DatabaseError, FindQuery};

#[cfg(feature = "sqlite")]
pub use database::sqlite::SqliteProvider;

// Error type
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Unknown table or row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed pagination parameters or row payload
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
