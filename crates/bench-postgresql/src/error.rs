//! Error types for the PostgreSQL backend.

use thiserror::Error;

/// Errors raised inside the PostgreSQL backend before they are mapped onto
/// the shared setup/load taxonomy.
#[derive(Error, Debug)]
pub enum PostgreSQLBackendError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Reading the partition file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
