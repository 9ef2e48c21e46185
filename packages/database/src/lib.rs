#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, stores, and migrations for the weather lab.
//!
//! Uses `switchy_database` raw queries for the three stores (cities,
//! temperature ranges, measurements) and `switchy_schema` for embedded SQL
//! migrations. Store queries stick to SQL accepted by both `PostgreSQL`
//! and `SQLite`; only the migrations are written per backend.

pub mod db;
pub mod queries;

use include_dir::{Dir, include_dir};
use switchy_database::Database;
use switchy_schema::discovery::embedded::EmbeddedMigrationSource;
use switchy_schema::runner::MigrationRunner;

/// Embedded `PostgreSQL` migrations.
static POSTGRES_MIGRATIONS_DIR: Dir<'_> =
    include_dir!("$CARGO_MANIFEST_DIR/../../migrations/postgres");

/// Embedded `SQLite` migrations.
static SQLITE_MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../migrations/sqlite");

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] switchy_schema::MigrationError),

    /// Connection could not be established.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of what went wrong.
        message: String,
    },

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },

    /// I/O error (creating the `SQLite` data directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which SQL engine a connection talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `PostgreSQL` via `tokio-postgres`.
    Postgres,
    /// `SQLite` via `rusqlite`.
    Sqlite,
}

/// Runs all pending database migrations for `backend`.
///
/// Creates the three tables and seeds the reference temperature ranges.
///
/// # Errors
///
/// Returns [`DbError`] if any migration fails to apply.
pub async fn run_migrations(db: &dyn Database, backend: Backend) -> Result<(), DbError> {
    let dir = match backend {
        Backend::Postgres => &POSTGRES_MIGRATIONS_DIR,
        Backend::Sqlite => &SQLITE_MIGRATIONS_DIR,
    };
    let source = EmbeddedMigrationSource::new(dir);
    let runner = MigrationRunner::new(Box::new(source));
    runner.run(db).await?;
    log::info!("Database migrations completed successfully ({backend:?})");
    Ok(())
}
