//! Database abstraction layer
//!
//! This module provides a database-agnostic interface for schema discovery
//! and row persistence.

pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the main trait
pub use traits::{DataSource, DatabaseError, FindQuery};
