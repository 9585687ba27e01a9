//! Error types for data generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating or merging partition files.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// IO error on a partition file.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited writer error.
    #[error("CSV error on {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The seed pool must hold at least one record.
    #[error("Seed pool is empty")]
    EmptySeedPool,

    /// A generator worker thread panicked.
    #[error("Generator worker panicked while writing {0:?}")]
    WorkerPanicked(PathBuf),
}

impl GenerationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerationError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        GenerationError::Csv {
            path: path.into(),
            source,
        }
    }
}
