//! SQL*Plus script runner for schema changes and the query workload.

use crate::error::OracleBackendError;
use crate::logon::Logon;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

const UTILITY: &str = "sqlplus";

/// Runs scripts through `sqlplus -S -L /nolog`.
///
/// The logon is sent on stdin with a `CONNECT` command so the password never
/// appears in the process arguments.
#[derive(Debug, Clone)]
pub struct SqlPlus {
    program: PathBuf,
    logon: Logon,
}

impl SqlPlus {
    pub fn new(program: PathBuf, logon: Logon) -> Self {
        Self { program, logon }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full script for `body`: error handling, output settings, logon, body,
    /// commit and exit.
    pub fn script(&self, body: &str) -> String {
        format!(
            "WHENEVER SQLERROR EXIT FAILURE ROLLBACK
WHENEVER OSERROR EXIT FAILURE ROLLBACK
SET HEADING OFF FEEDBACK OFF PAGESIZE 0 VERIFY OFF ECHO OFF SERVEROUTPUT ON
{}
{body}
COMMIT;
EXIT SUCCESS
",
            self.logon.connect_command()
        )
    }

    /// Run `body` and return standard output.
    pub async fn run(&self, body: &str) -> Result<String, OracleBackendError> {
        debug!("{} as {}: {}", UTILITY, self.logon.masked(), body);

        let mut child = Command::new(&self.program)
            .args(["-S", "-L", "/nolog"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(self.script(body).as_bytes())
                .await
                .map_err(|source| self.spawn_error(source))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| self.spawn_error(source))?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            // SQL*Plus reports ORA- errors on stdout.
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OracleBackendError::Exit {
                utility: UTILITY.to_string(),
                status: output.status.to_string(),
                stderr: format!("{}{}", stdout.trim(), stderr.trim()),
            });
        }
        Ok(stdout)
    }

    /// Run `body` and parse the last line of output as a number.
    pub async fn run_for_count(&self, body: &str) -> Result<u64, OracleBackendError> {
        let output = self.run(body).await?;
        parse_count(&output)
    }

    fn spawn_error(&self, source: std::io::Error) -> OracleBackendError {
        OracleBackendError::Spawn {
            utility: UTILITY.to_string(),
            source,
        }
    }
}

/// Parse the last non-empty line of SQL*Plus output as a row count.
pub fn parse_count(output: &str) -> Result<u64, OracleBackendError> {
    output
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .and_then(|line| line.parse::<u64>().ok())
        .ok_or_else(|| OracleBackendError::Output {
            utility: UTILITY.to_string(),
            output: output.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::ConnectionSettings;

    fn sqlplus() -> SqlPlus {
        let logon = Logon::from_settings(&ConnectionSettings {
            user: "soe".to_string(),
            password: "tiger".to_string(),
            host: Some("dbhost".to_string()),
            database: Some("orclpdb".to_string()),
            connection_string: None,
        })
        .unwrap();
        SqlPlus::new(PathBuf::from("sqlplus"), logon)
    }

    #[test]
    fn test_script_layout() {
        let script = sqlplus().script("SELECT COUNT(1) FROM customers_test;");
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines[0], "WHENEVER SQLERROR EXIT FAILURE ROLLBACK");
        assert_eq!(lines[3], "CONNECT soe/\"tiger\"@\"//dbhost/orclpdb\"");
        assert_eq!(lines[4], "SELECT COUNT(1) FROM customers_test;");
        assert_eq!(lines.last(), Some(&"EXIT SUCCESS"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("\n      42\n\n").unwrap(), 42);
        assert_eq!(parse_count("Session altered.\n7\n").unwrap(), 7);
        assert!(matches!(
            parse_count("ORA-00942: table or view does not exist"),
            Err(OracleBackendError::Output { .. })
        ));
        assert!(parse_count("").is_err());
    }

    #[tokio::test]
    async fn test_missing_utility_is_spawn_error() {
        let mut plus = sqlplus();
        plus.program = PathBuf::from("/nonexistent/sqlplus");
        assert!(matches!(
            plus.run("SELECT 1 FROM dual;").await,
            Err(OracleBackendError::Spawn { .. })
        ));
    }
}
