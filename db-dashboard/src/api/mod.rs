//! HTTP endpoints
//!
//! Thin axum handlers over [`Dashboard`]. They pick the render mode from the
//! request headers and translate results and errors into responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use crate::database::DataSource;
use crate::dispatcher::{Dashboard, Refresh};
use crate::render::{render_error, Fragment, RenderMode, CONTENT_TARGET};
use crate::DashboardError;

pub mod rows;
pub mod tables;

// Re-export handlers for convenience
pub use rows::{delete_row_handler, edit_row_handler, new_row_handler, save_row_handler};
pub use tables::{index_handler, list_rows_handler};

/// htmx response header that makes the client load another view into a target
pub const HX_LOCATION: &str = "hx-location";

/// htmx response headers that redirect where and how a response is swapped
pub const HX_RETARGET: &str = "hx-retarget";
pub const HX_RESWAP: &str = "hx-reswap";

impl DashboardError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Schema(_)
            | DashboardError::Config(_)
            | DashboardError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Respond with a rendered view, or with the error it failed with
fn respond_with_fragment<DB: DataSource>(
    dashboard: &Dashboard<DB>,
    mode: RenderMode,
    result: Result<Fragment, DashboardError>,
) -> Response {
    match result {
        Ok(fragment) => Html(dashboard.finish(mode, fragment)).into_response(),
        Err(error) => respond_with_error(dashboard, mode, error),
    }
}

/// Respond to a write with a refresh of the list view
///
/// htmx requests get an empty body and an `HX-Location` header; plain form
/// posts get a `303 See Other` redirect.
fn respond_with_refresh<DB: DataSource>(
    dashboard: &Dashboard<DB>,
    mode: RenderMode,
    result: Result<Refresh, DashboardError>,
) -> Response {
    let refresh = match result {
        Ok(refresh) => refresh,
        Err(error) => return respond_with_error(dashboard, mode, error),
    };

    match mode {
        RenderMode::FullPage => Redirect::to(&refresh.location).into_response(),
        RenderMode::Partial => {
            let target = serde_json::json!({
                "path": refresh.location,
                "target": CONTENT_TARGET,
            });
            match HeaderValue::from_str(&target.to_string()) {
                Ok(value) => (StatusCode::OK, [(HX_LOCATION, value)]).into_response(),
                Err(_) => Redirect::to(&refresh.location).into_response(),
            }
        }
    }
}

fn respond_with_error<DB: DataSource>(
    dashboard: &Dashboard<DB>,
    mode: RenderMode,
    error: DashboardError,
) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        warn!("Request rejected: {}", error);
    }

    let heading = status.canonical_reason().unwrap_or("Error");
    let fragment = render_error(heading, &error.to_string());
    let body = dashboard.finish(mode, fragment);
    let html = [(header::CONTENT_TYPE, "text/html; charset=utf-8")];

    match mode {
        RenderMode::FullPage => (status, html, body).into_response(),
        // The triggering element may target itself or swap nothing (delete),
        // so the message is sent to the content area instead.
        RenderMode::Partial => (
            status,
            html,
            [(HX_RETARGET, CONTENT_TARGET), (HX_RESWAP, "innerHTML")],
            body,
        )
            .into_response(),
    }
}
