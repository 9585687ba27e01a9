//! Backend family selection.

use crate::config::BenchConfig;
use bench_core::{Backend, SetupError};
use bench_mysql::MySQLBackend;
use bench_oracle::OracleBackend;
use bench_postgresql::PostgreSQLBackend;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported backend families.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// PostgreSQL via COPY FROM STDIN
    #[value(name = "postgresql")]
    PostgreSQL,
    /// MySQL via LOAD DATA LOCAL INFILE
    #[value(name = "mysql")]
    MySQL,
    /// Oracle via SQL*Loader
    #[value(name = "oracle")]
    Oracle,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::PostgreSQL => write!(f, "PostgreSQL"),
            BackendKind::MySQL => write!(f, "MySQL"),
            BackendKind::Oracle => write!(f, "Oracle"),
        }
    }
}

/// Build the backend selected by `config`.
pub fn create_backend(config: &BenchConfig) -> Result<Arc<dyn Backend>, SetupError> {
    let backend: Arc<dyn Backend> = match config.backend {
        BackendKind::PostgreSQL => Arc::new(
            PostgreSQLBackend::new(&config.connection)?.with_table(config.table.clone()),
        ),
        BackendKind::MySQL => {
            Arc::new(MySQLBackend::new(&config.connection)?.with_table(config.table.clone()))
        }
        BackendKind::Oracle => Arc::new(
            OracleBackend::new(&config.connection, &config.work_dir, config.keep_files)?
                .with_table(config.table.clone()),
        ),
    };
    Ok(backend)
}
