//! Store queries for cities, temperature ranges, and measurements.
//!
//! Every function takes a `&dyn Database` and issues raw SQL through
//! `query_raw_params()`/`exec_raw_params()`. The SQL is limited to what
//! both `PostgreSQL` and `SQLite` accept.

pub mod cities;
pub mod measurements;
pub mod ranges;

use crate::DbError;

/// Wraps a column decode failure in [`DbError::Conversion`].
fn conversion(column: &str, e: impl std::fmt::Display) -> DbError {
    DbError::Conversion {
        message: format!("Failed to parse column {column}: {e}"),
    }
}
