//! Error types for the MySQL backend.

use thiserror::Error;

/// Errors raised inside the MySQL backend before they are mapped onto the
/// shared setup/load taxonomy.
#[derive(Error, Debug)]
pub enum MySQLBackendError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Connection URL could not be parsed.
    #[error("Invalid MySQL connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// The server accepted the statement but skipped rows.
    #[error("Loaded {loaded} of {expected} rows ({warnings} warnings); rejected rows were skipped")]
    RowsSkipped {
        expected: u64,
        loaded: u64,
        warnings: u16,
    },
}
