//! Welcome page and table listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, Response},
};
use std::sync::Arc;

use super::respond_with_fragment;
use crate::database::DataSource;
use crate::dispatcher::Dashboard;
use crate::pagination::PageQuery;
use crate::render::RenderMode;

/// Handler for GET /
///
/// Returns the welcome page with a link to every table.
pub async fn index_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    headers: HeaderMap,
) -> Html<String> {
    let mode = RenderMode::from_headers(&headers);
    Html(dashboard.finish(mode, dashboard.index()))
}

/// Handler for GET /tables/{table}
///
/// Query parameters:
/// - offset: Starting row offset (default: 0, must not be negative)
/// - limit: Maximum rows to return (default: 10, must be positive)
///
/// # Returns
///
/// The list view, or 404 for an unknown table and 400 for bad pagination
pub async fn list_rows_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    Path(table): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let mode = RenderMode::from_headers(&headers);
    let result = dashboard.list(&table, query).await;

    respond_with_fragment(&dashboard, mode, result)
}
