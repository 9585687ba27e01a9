//! Error taxonomy shared by every backend.
//!
//! Setup errors are fatal to the run. Load errors are scoped to a single
//! partition and never abort sibling partitions.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed driver error carried across the backend boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while preparing or mutating the schema, or running queries.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not open a connection to the backend.
    #[error("Connection error: {source}")]
    Connection {
        #[source]
        source: BoxError,
    },

    /// A statement was rejected by the backend.
    #[error("Statement failed `{statement}`: {source}")]
    Statement {
        statement: String,
        #[source]
        source: BoxError,
    },

    /// An external utility exited unsuccessfully.
    #[error("{utility} exited with {status}: {stderr}")]
    Utility {
        utility: String,
        status: String,
        stderr: String,
    },

    /// Local file handling failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SetupError {
    /// Wrap a driver error raised while opening a connection.
    pub fn connection(source: impl Into<BoxError>) -> Self {
        SetupError::Connection {
            source: source.into(),
        }
    }

    /// Wrap a driver error raised by `statement`.
    pub fn statement(statement: impl Into<String>, source: impl Into<BoxError>) -> Self {
        SetupError::Statement {
            statement: statement.into(),
            source: source.into(),
        }
    }
}

/// Errors raised while bulk loading a single partition.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The partition file could not be read.
    #[error("Failed to read partition file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend connection could not be opened for this partition.
    #[error("Connection error while loading {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The backend rejected the bulk load.
    #[error("Bulk load of {path:?} failed: {source}")]
    Driver {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The external bulk-load utility exited unsuccessfully.
    #[error("Bulk load utility exited with {status} for {path:?}; command: {command}")]
    Utility {
        path: PathBuf,
        command: String,
        status: String,
        stderr: String,
    },
}

impl LoadError {
    /// Path of the partition file the error relates to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Connection { path, .. }
            | LoadError::Driver { path, .. }
            | LoadError::Utility { path, .. } => path,
        }
    }
}
