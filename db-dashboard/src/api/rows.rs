//! Row form and write endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{respond_with_fragment, respond_with_refresh};
use crate::database::DataSource;
use crate::dispatcher::Dashboard;
use crate::render::RenderMode;

/// Handler for GET /tables/{table}/new
///
/// Returns an empty form for a new row.
pub async fn new_row_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mode = RenderMode::from_headers(&headers);
    let result = dashboard.new_form(&table);

    respond_with_fragment(&dashboard, mode, result)
}

/// Handler for GET /tables/{table}/{id}
///
/// Returns the edit form of the row whose primary key equals `id`, or 404.
pub async fn edit_row_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    Path((table, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mode = RenderMode::from_headers(&headers);
    let result = dashboard.edit_form(&table, &id).await;

    respond_with_fragment(&dashboard, mode, result)
}

/// Handler for POST /tables/{table}
///
/// Saves the form-encoded row and asks the client to reload the list view.
/// A row with a primary key value updates that row; one without inserts.
pub async fn save_row_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let mode = RenderMode::from_headers(&headers);
    let result = dashboard.submit(&table, &fields).await;

    respond_with_refresh(&dashboard, mode, result)
}

/// Handler for DELETE /tables/{table}/{id}
///
/// Deletes the row and asks the client to reload the list view. A missing
/// row is a 404 and nothing is deleted.
pub async fn delete_row_handler<DB: DataSource>(
    State(dashboard): State<Arc<Dashboard<DB>>>,
    Path((table, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mode = RenderMode::from_headers(&headers);
    let result = dashboard.delete(&table, &id).await;

    respond_with_refresh(&dashboard, mode, result)
}
