//! Offset/limit pagination
//!
//! [`PageQuery`] is what arrives on the query string; [`compute_window`]
//! validates it and derives the previous/next navigation state.

use serde::Deserialize;
use std::ops::Range;

use crate::DashboardError;

/// Offset applied when the request does not name one
pub const DEFAULT_OFFSET: i64 = 0;

/// Limit applied when the request does not name one
pub const DEFAULT_LIMIT: i64 = 10;

/// Query parameters for the list view
///
/// Both values are signed so that a negative offset reaches validation and is
/// reported as such instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Apply defaults and validate, yielding `(offset, limit)`
    pub fn resolve(&self, default_limit: u64) -> Result<(u64, u64), DashboardError> {
        let offset = self.offset.unwrap_or(DEFAULT_OFFSET);
        let limit = match self.limit {
            Some(limit) => limit,
            None => i64::try_from(default_limit).unwrap_or(DEFAULT_LIMIT),
        };

        if offset < 0 {
            return Err(DashboardError::Validation(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }
        if limit <= 0 {
            return Err(DashboardError::Validation(format!(
                "limit must be positive, got {}",
                limit
            )));
        }

        Ok((offset as u64, limit as u64))
    }
}

/// Pagination state of one rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
    pub total_count: u64,
    pub returned_count: u64,
}

impl PageWindow {
    /// A previous page exists once a full limit fits before the offset
    pub fn has_previous(&self) -> bool {
        self.offset >= self.limit
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total_count
    }

    /// Offset of the previous page, never negative
    pub fn previous_offset(&self) -> Option<u64> {
        self.has_previous()
            .then(|| self.offset.saturating_sub(self.limit))
    }

    pub fn next_offset(&self) -> Option<u64> {
        self.has_next().then(|| self.offset + self.limit)
    }

    /// Zero-based range of rows shown on this page
    pub fn displayed_range(&self) -> Range<u64> {
        self.offset..self.offset + self.returned_count
    }

    /// One-based summary such as `11 - 20 of 25`
    pub fn summary(&self) -> String {
        if self.returned_count == 0 {
            return format!("0 of {}", self.total_count);
        }
        let range = self.displayed_range();
        format!("{} - {} of {}", range.start + 1, range.end, self.total_count)
    }
}

/// Build the page window for a listing
///
/// Rejects a negative offset or a non-positive limit; values are never
/// clamped.
pub fn compute_window(
    offset: i64,
    limit: i64,
    total_count: u64,
    returned_count: u64,
) -> Result<PageWindow, DashboardError> {
    let (offset, limit) = PageQuery::new(offset, limit).resolve(DEFAULT_LIMIT as u64)?;

    Ok(PageWindow {
        offset,
        limit,
        total_count,
        returned_count,
    })
}
