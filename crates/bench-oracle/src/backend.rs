//! Oracle implementation of the backend capability traits.

use crate::control::{control_file_contents, CONTROL_FILE_NAME, LOG_FILE_NAME};
use crate::ddl::{generate_create_table, generate_drop_table, row_count_block};
use crate::error::OracleBackendError;
use crate::logon::Logon;
use crate::sqlldr::SqlLoaderCommand;
use crate::sqlplus::SqlPlus;
use crate::utility_path;
use async_trait::async_trait;
use bench_core::{
    add_primary_key_statement, scan_statement, update_statement, Backend, BulkLoader,
    ConnectionSettings, IndexDefinition, LoadError, LoadMode, Partition, QueryWorkload,
    SchemaManager, SetupError, TABLE_NAME,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Oracle backend driving SQL*Loader and SQL*Plus.
#[derive(Debug, Clone)]
pub struct OracleBackend {
    logon: Logon,
    oracle_home: Option<PathBuf>,
    work_dir: PathBuf,
    keep_files: bool,
    table: String,
}

impl OracleBackend {
    /// Build the backend.
    ///
    /// Control and log files are written to `work_dir`. With `keep_files`
    /// they are left in place at the end of the run. `ORACLE_HOME` is read
    /// from the environment.
    pub fn new(
        settings: &ConnectionSettings,
        work_dir: impl Into<PathBuf>,
        keep_files: bool,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            logon: Logon::from_settings(settings)?,
            oracle_home: std::env::var_os("ORACLE_HOME").map(PathBuf::from),
            work_dir: work_dir.into(),
            keep_files,
            table: TABLE_NAME.to_string(),
        })
    }

    /// Override the utility location instead of reading `ORACLE_HOME`.
    pub fn with_oracle_home(mut self, oracle_home: Option<PathBuf>) -> Self {
        self.oracle_home = oracle_home;
        self
    }

    /// Use a different target table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn control_path(&self) -> PathBuf {
        self.work_dir.join(CONTROL_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.work_dir.join(LOG_FILE_NAME)
    }

    /// The `sqlldr` command that would load `data` in `mode`.
    pub fn loader_command(&self, data: &Path, mode: LoadMode) -> SqlLoaderCommand {
        SqlLoaderCommand::new(
            utility_path(self.oracle_home.as_deref(), "sqlldr"),
            &self.logon,
            data,
            &self.control_path(),
            &self.log_path(),
            mode,
        )
    }

    fn sqlplus(&self) -> SqlPlus {
        SqlPlus::new(
            utility_path(self.oracle_home.as_deref(), "sqlplus"),
            self.logon.clone(),
        )
    }

    async fn execute(&self, body: &str) -> Result<(), SetupError> {
        self.sqlplus().run(body).await?;
        Ok(())
    }
}

async fn remove_if_present(path: &Path) -> Result<(), SetupError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl BulkLoader for OracleBackend {
    async fn prepare(&self) -> Result<(), SetupError> {
        let path = self.control_path();
        tokio::fs::write(&path, control_file_contents(&self.table)).await?;
        info!("Wrote SQL*Loader control file {}", path.display());
        Ok(())
    }

    async fn load(&self, partition: &Partition, mode: LoadMode) -> Result<u64, LoadError> {
        let path = &partition.path;
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(LoadError::Io {
                path: path.clone(),
                source: std::io::Error::new(ErrorKind::NotFound, "partition file not found"),
            });
        }

        let command = self.loader_command(path, mode);
        debug!("Running: {}", command.masked());

        let start = Instant::now();
        if let Err(e) = command.run().await {
            error!("sqlldr failed for {}: {}", path.display(), e);
            let (status, stderr) = match e {
                OracleBackendError::Exit { status, stderr, .. } => (status, stderr),
                other => ("not started".to_string(), other.to_string()),
            };
            return Err(LoadError::Utility {
                path: path.clone(),
                command: command.masked().to_string(),
                status,
                stderr,
            });
        }

        // A zero exit status means every row was accepted.
        info!(
            "Loaded {} rows from {} ({} mode) in {:?}",
            partition.row_count,
            path.display(),
            mode,
            start.elapsed()
        );
        Ok(partition.row_count)
    }

    async fn cleanup(&self) -> Result<(), SetupError> {
        if self.keep_files {
            debug!("Keeping SQL*Loader control and log files");
            return Ok(());
        }
        remove_if_present(&self.control_path()).await?;
        remove_if_present(&self.log_path()).await?;
        Ok(())
    }
}

#[async_trait]
impl SchemaManager for OracleBackend {
    async fn recreate_table(&self) -> Result<(), SetupError> {
        info!("Dropping table: {}", self.table);
        self.execute(&generate_drop_table(&self.table)).await?;
        info!("Creating table: {}", self.table);
        self.execute(&generate_create_table(&self.table)).await?;
        Ok(())
    }

    async fn add_primary_key(&self) -> Result<(), SetupError> {
        self.execute(&format!("{};", add_primary_key_statement(&self.table)))
            .await
    }

    async fn add_index(&self, index: &IndexDefinition) -> Result<(), SetupError> {
        self.execute(&format!("{};", index.create_statement(&self.table)))
            .await
    }
}

#[async_trait]
impl QueryWorkload for OracleBackend {
    async fn update(&self) -> Result<u64, SetupError> {
        let body = row_count_block(&update_statement(&self.table));
        Ok(self.sqlplus().run_for_count(&body).await?)
    }

    async fn scan(&self) -> Result<u64, SetupError> {
        let body = format!("{};", scan_statement(&self.table));
        Ok(self.sqlplus().run_for_count(&body).await?)
    }
}

impl Backend for OracleBackend {
    fn name(&self) -> &'static str {
        "Oracle"
    }
}
