//! HTML rendering
//!
//! Every function here is pure: it takes schema, rows, and pagination state and
//! returns markup. Views come out as [`Fragment`]s, which the dispatcher either
//! sends as-is (htmx swaps) or wraps in the full page [`layout`].

use axum::http::HeaderMap;

pub mod form;
pub mod layout;
pub mod table;

pub use form::render_form;
pub use layout::{render_error, render_index, render_page};
pub use table::render_table;

/// Id of the element that htmx requests swap into
pub const CONTENT_TARGET: &str = "#content";

/// A rendered view, without the surrounding page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub title: String,
    pub body: String,
}

/// Whether a response is a bare fragment or a complete page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Partial,
    FullPage,
}

impl RenderMode {
    /// htmx marks its own requests with `HX-Request`; anything else is a
    /// navigation that needs the whole page
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if headers.contains_key("hx-request") {
            RenderMode::Partial
        } else {
            RenderMode::FullPage
        }
    }
}

/// URL builder for every link the dashboard emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    base_path: String,
}

impl Paths {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn index(&self) -> String {
        if self.base_path.is_empty() {
            "/".to_string()
        } else {
            self.base_path.clone()
        }
    }

    /// Collection endpoint of a table, also the list view
    pub fn table(&self, table: &str) -> String {
        format!("{}/tables/{}", self.base_path, encode_path_segment(table))
    }

    pub fn table_page(&self, table: &str, offset: u64, limit: u64) -> String {
        format!("{}?offset={}&limit={}", self.table(table), offset, limit)
    }

    pub fn new_row(&self, table: &str) -> String {
        format!("{}/new", self.table(table))
    }

    pub fn row(&self, table: &str, id: &str) -> String {
        format!("{}/{}", self.table(table), encode_path_segment(id))
    }
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Percent-encode a single URL path segment
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Anchor that navigates with htmx and still works without it
fn nav_link(href: &str, label: &str) -> String {
    let href = escape_html(href);
    format!(
        r#"<a href="{href}" hx-get="{href}" hx-target="{target}" hx-swap="innerHTML" hx-push-url="true">{label}</a>"#,
        href = href,
        target = CONTENT_TARGET,
        label = escape_html(label),
    )
}
