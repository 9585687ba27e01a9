//! Command-line options and the validated benchmark configuration.

use crate::target::BackendKind;
use bench_core::{ConnectionSettings, SetupError, TABLE_NAME};
use bench_generator::SeedPool;
use clap::Args;
use std::path::PathBuf;

/// Records generated per phase at scale 1.0.
pub const BASELINE_RECORDS: u64 = 3_342_227;

/// Credentials and addressing of the target database.
#[derive(Args, Clone)]
pub struct ConnectionOpts {
    /// Database username
    #[arg(short = 'u', long, env = "BENCH_USER")]
    pub user: String,

    /// Database password
    #[arg(short = 'p', long, env = "BENCH_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Database host, optionally with a :port suffix
    #[arg(long, env = "BENCH_HOSTNAME")]
    pub hostname: Option<String>,

    /// Database name (PostgreSQL, MySQL) or service name (Oracle)
    #[arg(short = 'd', long, env = "BENCH_DATABASE")]
    pub database: Option<String>,

    /// Full connection string, used instead of hostname and database
    #[arg(long, env = "BENCH_CONNECTION_STRING")]
    pub connection_string: Option<String>,
}

impl ConnectionOpts {
    pub fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            user: self.user.clone(),
            password: self.password.clone(),
            host: self.hostname.clone(),
            database: self.database.clone(),
            connection_string: self.connection_string.clone(),
        }
    }
}

impl std::fmt::Debug for ConnectionOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.settings(), f)
    }
}

/// Benchmark arguments.
#[derive(Args, Clone, Debug)]
pub struct BenchArgs {
    #[command(flatten)]
    pub connection: ConnectionOpts,

    /// Target backend family
    #[arg(short = 't', long, value_enum, ignore_case = true)]
    pub target: BackendKind,

    /// Scale factor applied to the baseline record count
    #[arg(short = 's', long, default_value = "1.0")]
    pub size: f64,

    /// Number of concurrent generation and load workers
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Keep generated data, control and log files
    #[arg(long)]
    pub dont_delete: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Random seed for reproducible data (omit for fresh data on every run)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of synthetic profiles in the seed pool
    #[arg(long, default_value_t = SeedPool::DEFAULT_SIZE)]
    pub seed_pool_size: usize,

    /// Directory for partition files and loader artifacts
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// Also write the final report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

/// Validated benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub connection: ConnectionSettings,
    pub backend: BackendKind,
    pub scale: f64,
    /// Records planned per generation phase.
    pub total_records: u64,
    pub workers: usize,
    pub keep_files: bool,
    pub seed: Option<u64>,
    pub seed_pool_size: usize,
    pub work_dir: PathBuf,
    pub table: String,
}

/// Records planned per phase for a scale factor.
pub fn total_records(scale: f64) -> u64 {
    (BASELINE_RECORDS as f64 * scale) as u64
}

impl BenchArgs {
    /// Validate the arguments into a [`BenchConfig`].
    pub fn into_config(self) -> Result<BenchConfig, SetupError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(SetupError::Config(format!(
                "size must be a positive number, got {}",
                self.size
            )));
        }
        if self.threads == 0 {
            return Err(SetupError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.seed_pool_size == 0 {
            return Err(SetupError::Config(
                "seed pool size must be at least 1".to_string(),
            ));
        }
        if !self.work_dir.is_dir() {
            return Err(SetupError::Config(format!(
                "work directory {:?} does not exist",
                self.work_dir
            )));
        }

        let connection = self.connection.settings();
        connection.target()?;

        Ok(BenchConfig {
            connection,
            backend: self.target,
            scale: self.size,
            total_records: total_records(self.size),
            workers: self.threads,
            keep_files: self.dont_delete,
            seed: self.seed,
            seed_pool_size: self.seed_pool_size,
            work_dir: self.work_dir,
            table: TABLE_NAME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: BenchArgs,
    }

    fn parse(extra: &[&str]) -> BenchArgs {
        let mut argv = vec![
            "batch-bench",
            "-u",
            "bench",
            "-p",
            "secret",
            "--hostname",
            "localhost",
            "-d",
            "benchdb",
        ];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["-t", "postgresql"]).into_config().unwrap();

        assert_eq!(config.backend, BackendKind::PostgreSQL);
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.total_records, BASELINE_RECORDS);
        assert_eq!(config.workers, 1);
        assert!(!config.keep_files);
        assert_eq!(config.seed, None);
        assert_eq!(config.seed_pool_size, 10_000);
        assert_eq!(config.table, "customers_test");
    }

    #[test]
    fn test_target_ignores_case() {
        let args = parse(&["-t", "Oracle", "-s", "0.5", "--threads", "8", "--dont-delete"]);
        let config = args.into_config().unwrap();

        assert_eq!(config.backend, BackendKind::Oracle);
        assert_eq!(config.total_records, 1_671_113);
        assert_eq!(config.workers, 8);
        assert!(config.keep_files);
    }

    #[test]
    fn test_rejects_zero_threads() {
        let err = parse(&["-t", "mysql", "--threads", "0"])
            .into_config()
            .unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        assert!(parse(&["-t", "mysql", "-s", "0"]).into_config().is_err());
        assert!(parse(&["-t", "mysql", "--size=-2"]).into_config().is_err());
    }

    #[test]
    fn test_rejects_missing_database() {
        let args = TestCli::try_parse_from([
            "batch-bench",
            "-u",
            "bench",
            "-p",
            "secret",
            "--hostname",
            "localhost",
            "-t",
            "postgresql",
        ])
        .unwrap()
        .args;
        assert!(matches!(args.into_config(), Err(SetupError::Config(_))));
    }

    #[test]
    fn test_connection_string_substitutes_host() {
        let args = TestCli::try_parse_from([
            "batch-bench",
            "-u",
            "bench",
            "-p",
            "secret",
            "--connection-string",
            "dbhost:1521/orclpdb",
            "-t",
            "oracle",
        ])
        .unwrap()
        .args;
        let config = args.into_config().unwrap();
        assert_eq!(
            config.connection.connection_string.as_deref(),
            Some("dbhost:1521/orclpdb")
        );
    }

    #[test]
    fn test_debug_masks_password() {
        let args = parse(&["-t", "postgresql"]);
        assert!(!format!("{args:?}").contains("secret"));
    }
}
