//! Error types for the Oracle backend.

use bench_core::SetupError;
use thiserror::Error;

/// Errors raised while driving the Oracle client utilities.
#[derive(Error, Debug)]
pub enum OracleBackendError {
    /// The utility could not be started.
    #[error("Failed to start {utility}: {source}")]
    Spawn {
        utility: String,
        #[source]
        source: std::io::Error,
    },

    /// The utility ran but exited unsuccessfully.
    #[error("{utility} exited with {status}: {stderr}")]
    Exit {
        utility: String,
        status: String,
        stderr: String,
    },

    /// The utility output could not be interpreted.
    #[error("Unexpected {utility} output: {output}")]
    Output { utility: String, output: String },
}

impl From<OracleBackendError> for SetupError {
    fn from(e: OracleBackendError) -> Self {
        match e {
            OracleBackendError::Spawn { utility, source } => SetupError::Utility {
                utility,
                status: "not started".to_string(),
                stderr: source.to_string(),
            },
            OracleBackendError::Exit {
                utility,
                status,
                stderr,
            } => SetupError::Utility {
                utility,
                status,
                stderr,
            },
            OracleBackendError::Output { utility, output } => SetupError::Utility {
                utility,
                status: "unexpected output".to_string(),
                stderr: output,
            },
        }
    }
}
