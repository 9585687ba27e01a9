//! PostgreSQL implementation of the backend capability traits.

use crate::copy::copy_file;
use crate::ddl::{generate_create_table, generate_drop_table};
use crate::error::PostgreSQLBackendError;
use async_trait::async_trait;
use bench_core::{
    add_primary_key_statement, scan_statement, update_statement, Backend, BulkLoader,
    ConnectionSettings, ConnectionTarget, IndexDefinition, LoadError, LoadMode, Partition,
    QueryWorkload, SchemaManager, SetupError, TABLE_NAME,
};
use std::time::Instant;
use tokio_postgres::{Client, Config, NoTls};
use tracing::{debug, info};

/// PostgreSQL backend using `COPY FROM STDIN` for bulk loads.
#[derive(Debug, Clone)]
pub struct PostgreSQLBackend {
    config: Config,
    table: String,
}

impl PostgreSQLBackend {
    /// Build the backend from connection settings.
    ///
    /// A connection string may be a key/value string (`host=... dbname=...`)
    /// or a `postgresql://` URL. Credentials from the settings fill in any the
    /// string omits. A hostname may carry a `:port` suffix.
    pub fn new(settings: &ConnectionSettings) -> Result<Self, SetupError> {
        let mut config = match settings.target()? {
            ConnectionTarget::ConnectionString(cs) => cs.parse::<Config>().map_err(|e| {
                SetupError::Config(format!("invalid PostgreSQL connection string: {e}"))
            })?,
            ConnectionTarget::HostDatabase { host, database } => {
                let mut config = Config::new();
                match host.rsplit_once(':') {
                    Some((name, port)) => {
                        let port: u16 = port.parse().map_err(|_| {
                            SetupError::Config(format!("invalid port in hostname '{host}'"))
                        })?;
                        config.host(name).port(port);
                    }
                    None => {
                        config.host(host);
                    }
                }
                config.dbname(database);
                config
            }
        };

        if config.get_user().is_none() {
            config.user(&settings.user);
        }
        if config.get_password().is_none() {
            config.password(&settings.password);
        }

        Ok(Self {
            config,
            table: TABLE_NAME.to_string(),
        })
    }

    /// Use a different target table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The resolved driver configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open a dedicated connection.
    async fn connect(&self) -> Result<Client, tokio_postgres::Error> {
        let (client, connection) = self.config.connect(NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(client)
    }

    async fn setup_client(&self) -> Result<Client, SetupError> {
        self.connect().await.map_err(SetupError::connection)
    }

    /// Run one statement on its own connection, returning affected rows.
    async fn execute(&self, sql: &str) -> Result<u64, SetupError> {
        let client = self.setup_client().await?;
        debug!("Executing: {}", sql);
        client
            .execute(sql, &[])
            .await
            .map_err(|e| SetupError::statement(sql, e))
    }
}

#[async_trait]
impl BulkLoader for PostgreSQLBackend {
    async fn load(&self, partition: &Partition, mode: LoadMode) -> Result<u64, LoadError> {
        let path = &partition.path;
        let start = Instant::now();
        debug!(
            "Loading {} ({} mode has no effect on COPY)",
            path.display(),
            mode
        );

        let mut client = self.connect().await.map_err(|e| LoadError::Connection {
            path: path.clone(),
            source: e.into(),
        })?;

        let rows = copy_file(&mut client, &partition.table, path)
            .await
            .map_err(|e| match e {
                PostgreSQLBackendError::Io(source) => LoadError::Io {
                    path: path.clone(),
                    source,
                },
                other => LoadError::Driver {
                    path: path.clone(),
                    source: Box::new(other),
                },
            })?;

        info!(
            "Copied {} rows from {} in {:?}",
            rows,
            path.display(),
            start.elapsed()
        );
        Ok(rows)
    }
}

#[async_trait]
impl SchemaManager for PostgreSQLBackend {
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
impl QueryWorkload for PostgreSQLBackend {
    async fn update(&self) -> Result<u64, SetupError> {
        self.execute(&update_statement(&self.table)).await
    }

    async fn scan(&self) -> Result<u64, SetupError> {
        let sql = scan_statement(&self.table);
        let client = self.setup_client().await?;
        debug!("Executing: {}", sql);
        let row = client
            .query_one(sql.as_str(), &[])
            .await
            .map_err(|e| SetupError::statement(sql.as_str(), e))?;
        let count: i64 = row
            .try_get(0)
            .map_err(|e| SetupError::statement(sql.as_str(), e))?;
        Ok(count.max(0) as u64)
    }
}

impl Backend for PostgreSQLBackend {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_postgres::config::Host;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            user: "bench".to_string(),
            password: "secret".to_string(),
            host: Some("db1:5433".to_string()),
            database: Some("benchdb".to_string()),
            connection_string: None,
        }
    }

    #[test]
    fn test_config_from_host_database() {
        let backend = PostgreSQLBackend::new(&settings()).unwrap();
        let config = backend.config();

        assert_eq!(config.get_hosts(), &[Host::Tcp("db1".to_string())]);
        assert_eq!(config.get_ports(), &[5433]);
        assert_eq!(config.get_dbname(), Some("benchdb"));
        assert_eq!(config.get_user(), Some("bench"));
        assert_eq!(config.get_password(), Some(&b"secret"[..]));
    }

    #[test]
    fn test_connection_string_keeps_its_own_user() {
        let mut s = settings();
        s.connection_string = Some("host=db2 user=other dbname=x".to_string());
        let backend = PostgreSQLBackend::new(&s).unwrap();

        assert_eq!(backend.config().get_user(), Some("other"));
        assert_eq!(backend.config().get_password(), Some(&b"secret"[..]));
        assert_eq!(backend.config().get_dbname(), Some("x"));
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut s = settings();
        s.host = Some("db1:notaport".to_string());
        assert!(matches!(
            PostgreSQLBackend::new(&s),
            Err(SetupError::Config(_))
        ));
    }

    #[test]
    fn test_missing_target_rejected() {
        let mut s = settings();
        s.host = None;
        assert!(PostgreSQLBackend::new(&s).is_err());
    }

    #[tokio::test]
    async fn test_load_unreachable_server_is_partition_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("People_data_1_1.csv");
        std::fs::write(&path, "0|a\n").unwrap();

        let mut s = settings();
        s.host = Some("127.0.0.1:1".to_string());
        let backend = PostgreSQLBackend::new(&s).unwrap();
        let partition = Partition {
            table: TABLE_NAME.to_string(),
            path: path.clone(),
            row_count: 1,
            starting_id: 0,
        };

        let err = backend
            .load(&partition, LoadMode::Unconstrained)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Connection { .. }));
        assert_eq!(err.path(), &path);
    }
}
