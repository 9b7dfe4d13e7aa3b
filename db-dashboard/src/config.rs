//! Dashboard configuration

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_LIMIT;
use crate::DashboardError;

/// Settings for a mounted dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// URL prefix the dashboard is mounted under (e.g., "/admin"); empty for the root
    pub base_path: String,

    /// Heading and document title of full pages
    pub title: String,

    /// Page size when a list request does not name one
    pub default_limit: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            title: "DB Dashboard".to_string(),
            default_limit: DEFAULT_LIMIT as u64,
        }
    }
}

impl DashboardConfig {
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }

    /// Reject settings no request could be served with
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.default_limit == 0 || i64::try_from(self.default_limit).is_err() {
            return Err(DashboardError::Config(format!(
                "default limit must be between 1 and {}, got {}",
                i64::MAX,
                self.default_limit
            )));
        }
        Ok(())
    }
}
