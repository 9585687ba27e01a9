//! MySQL implementation of the backend capability traits.

use crate::ddl::{generate_create_table, generate_drop_table, generate_load_data, DISABLE_CHECKS};
use crate::error::MySQLBackendError;
use async_trait::async_trait;
use bench_core::{
    add_primary_key_statement, scan_statement, update_statement, Backend, BulkLoader,
    ConnectionSettings, ConnectionTarget, IndexDefinition, LoadError, LoadMode, Partition,
    QueryWorkload, SchemaManager, SetupError, TABLE_NAME,
};
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, WhiteListFsHandler};
use std::time::Instant;
use tracing::{debug, info, warn};

/// MySQL backend using `LOAD DATA LOCAL INFILE` for bulk loads.
#[derive(Debug, Clone)]
pub struct MySQLBackend {
    opts: Opts,
    table: String,
}

impl MySQLBackend {
    /// Build the backend from connection settings.
    ///
    /// A connection string must be a `mysql://` URL. Credentials from the
    /// settings fill in any the URL omits. A hostname may carry a `:port`
    /// suffix.
    pub fn new(settings: &ConnectionSettings) -> Result<Self, SetupError> {
        let builder = match settings.target()? {
            ConnectionTarget::ConnectionString(cs) => {
                let opts = Opts::from_url(cs)
                    .map_err(|e| SetupError::Config(MySQLBackendError::from(e).to_string()))?;
                let user = opts.user().map(str::to_string);
                let pass = opts.pass().map(str::to_string);
                OptsBuilder::from_opts(opts)
                    .user(Some(user.unwrap_or_else(|| settings.user.clone())))
                    .pass(Some(pass.unwrap_or_else(|| settings.password.clone())))
            }
            ConnectionTarget::HostDatabase { host, database } => {
                let builder = match host.rsplit_once(':') {
                    Some((name, port)) => {
                        let port: u16 = port.parse().map_err(|_| {
                            SetupError::Config(format!("invalid port in hostname '{host}'"))
                        })?;
                        OptsBuilder::default().ip_or_hostname(name).tcp_port(port)
                    }
                    None => OptsBuilder::default().ip_or_hostname(host),
                };
                builder
                    .db_name(Some(database))
                    .user(Some(&settings.user))
                    .pass(Some(&settings.password))
            }
        };

        Ok(Self {
            opts: builder.into(),
            table: TABLE_NAME.to_string(),
        })
    }

    /// Use a different target table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The resolved driver options.
    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    async fn setup_conn(&self) -> Result<Conn, SetupError> {
        Conn::new(self.opts.clone())
            .await
            .map_err(SetupError::connection)
    }

    /// Run one statement on its own connection, returning affected rows.
    async fn execute(&self, sql: &str) -> Result<u64, SetupError> {
        let mut conn = self.setup_conn().await?;
        debug!("Executing: {}", sql);
        conn.query_drop(sql)
            .await
            .map_err(|e| SetupError::statement(sql, e))?;
        let affected = conn.affected_rows();
        if let Err(e) = conn.disconnect().await {
            warn!("Failed to close MySQL connection: {}", e);
        }
        Ok(affected)
    }
}

/// Reject a load that skipped rows.
///
/// `LOAD DATA LOCAL` implies `IGNORE`: duplicate keys are skipped and bad
/// values become warnings while the statement still succeeds.
fn check_loaded_rows(partition: &Partition, loaded: u64, warnings: u16) -> Result<(), LoadError> {
    if loaded == partition.row_count && warnings == 0 {
        return Ok(());
    }
    Err(LoadError::Driver {
        path: partition.path.clone(),
        source: Box::new(MySQLBackendError::RowsSkipped {
            expected: partition.row_count,
            loaded,
            warnings,
        }),
    })
}

#[async_trait]
impl BulkLoader for MySQLBackend {
    async fn load(&self, partition: &Partition, mode: LoadMode) -> Result<u64, LoadError> {
        let path = &partition.path;
        let start = Instant::now();

        let absolute = tokio::fs::canonicalize(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;

        let opts = OptsBuilder::from_opts(self.opts.clone())
            .local_infile_handler(Some(WhiteListFsHandler::new(vec![absolute.clone()])));
        let mut conn = Conn::new(opts).await.map_err(|e| LoadError::Connection {
            path: path.clone(),
            source: e.into(),
        })?;

        let driver = |e: mysql_async::Error| LoadError::Driver {
            path: path.clone(),
            source: Box::new(MySQLBackendError::from(e)),
        };

        if mode.allows_direct_path() {
            debug!("Executing: {}", DISABLE_CHECKS);
            conn.query_drop(DISABLE_CHECKS).await.map_err(driver)?;
        }

        let sql = generate_load_data(&partition.table, &absolute);
        debug!("Executing: {}", sql);
        conn.query_drop(sql).await.map_err(driver)?;
        let rows = conn.affected_rows();
        let warnings = conn.get_warnings();

        if let Err(e) = conn.disconnect().await {
            warn!("Failed to close MySQL connection: {}", e);
        }

        check_loaded_rows(partition, rows, warnings)?;

        info!(
            "Loaded {} rows from {} ({} mode) in {:?}",
            rows,
            path.display(),
            mode,
            start.elapsed()
        );
        Ok(rows)
    }
}

#[async_trait]
impl SchemaManager for MySQLBackend {
    async fn recreate_table(&self) -> Result<(), SetupError> {
        info!("Dropping table: {}", self.table);
        self.execute(&generate_drop_table(&self.table)).await?;
        info!("Creating table: {}", self.table);
        self.execute(&generate_create_table(&self.table)).await?;
        Ok(())
    }

    async fn add_primary_key(&self) -> Result<(), SetupError> {
        self.execute(&add_primary_key_statement(&self.table)).await?;
        Ok(())
    }

    async fn add_index(&self, index: &IndexDefinition) -> Result<(), SetupError> {
        self.execute(&index.create_statement(&self.table)).await?;
        Ok(())
    }
}

#[async_trait]
impl QueryWorkload for MySQLBackend {
    async fn update(&self) -> Result<u64, SetupError> {
        self.execute(&update_statement(&self.table)).await
    }

    async fn scan(&self) -> Result<u64, SetupError> {
        let sql = scan_statement(&self.table);
        let mut conn = self.setup_conn().await?;
        debug!("Executing: {}", sql);
        let count: Option<i64> = conn
            .query_first(sql.as_str())
            .await
            .map_err(|e| SetupError::statement(sql.as_str(), e))?;
        if let Err(e) = conn.disconnect().await {
            warn!("Failed to close MySQL connection: {}", e);
        }
        Ok(count.unwrap_or(0).max(0) as u64)
    }
}

impl Backend for MySQLBackend {
    fn name(&self) -> &'static str {
        "MySQL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            user: "bench".to_string(),
            password: "secret".to_string(),
            host: Some("db1:3307".to_string()),
            database: Some("benchdb".to_string()),
            connection_string: None,
        }
    }

    #[test]
    fn test_opts_from_host_database() {
        let backend = MySQLBackend::new(&settings()).unwrap();
        let opts = backend.opts();

        assert_eq!(opts.ip_or_hostname(), "db1");
        assert_eq!(opts.tcp_port(), 3307);
        assert_eq!(opts.db_name(), Some("benchdb"));
        assert_eq!(opts.user(), Some("bench"));
        assert_eq!(opts.pass(), Some("secret"));
    }

    #[test]
    fn test_opts_from_url() {
        let mut s = settings();
        s.connection_string = Some("mysql://root@db2:3306/other".to_string());
        let backend = MySQLBackend::new(&s).unwrap();

        assert_eq!(backend.opts().ip_or_hostname(), "db2");
        assert_eq!(backend.opts().user(), Some("root"));
        assert_eq!(backend.opts().pass(), Some("secret"));
        assert_eq!(backend.opts().db_name(), Some("other"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut s = settings();
        s.connection_string = Some("postgres://nope".to_string());
        assert!(matches!(MySQLBackend::new(&s), Err(SetupError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let backend = MySQLBackend::new(&settings()).unwrap();
        let partition = Partition {
            table: TABLE_NAME.to_string(),
            path: dir.path().join("People_data_1_10.csv"),
            row_count: 10,
            starting_id: 0,
        };

        let err = backend
            .load(&partition, LoadMode::Constrained)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    fn partition() -> Partition {
        Partition {
            table: TABLE_NAME.to_string(),
            path: std::path::PathBuf::from("People_data_1_100.csv"),
            row_count: 100,
            starting_id: 0,
        }
    }

    #[test]
    fn test_complete_load_accepted() {
        assert!(check_loaded_rows(&partition(), 100, 0).is_ok());
    }

    #[test]
    fn test_skipped_duplicates_rejected() {
        let err = check_loaded_rows(&partition(), 0, 100).unwrap_err();
        match err {
            LoadError::Driver { path, source } => {
                assert_eq!(path, std::path::PathBuf::from("People_data_1_100.csv"));
                assert!(source.to_string().contains("Loaded 0 of 100 rows"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_conversion_warnings_rejected() {
        // Every row counted but values were truncated or coerced.
        assert!(check_loaded_rows(&partition(), 100, 3).is_err());
    }
}
