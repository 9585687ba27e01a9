//! SQL*Loader invocation.

use crate::error::OracleBackendError;
use crate::logon::Logon;
use bench_core::LoadMode;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const UTILITY: &str = "sqlldr";

/// One `sqlldr` run loading a single data file.
#[derive(Debug, Clone)]
pub struct SqlLoaderCommand {
    program: PathBuf,
    args: Vec<String>,
    masked: String,
}

impl SqlLoaderCommand {
    /// Build the command line.
    ///
    /// `direct=true` is only passed in unconstrained mode: a direct path load
    /// into an indexed table would leave the indexes unusable.
    pub fn new(
        program: PathBuf,
        logon: &Logon,
        data: &Path,
        control: &Path,
        log: &Path,
        mode: LoadMode,
    ) -> Self {
        let mut args = vec![
            format!("userid={}", logon.userid()),
            format!("data={}", data.display()),
            format!("control={}", control.display()),
            format!("log={}", log.display()),
            "silent=all".to_string(),
            "direct_path_lock_wait=true".to_string(),
        ];
        if mode.allows_direct_path() {
            args.push("direct=true".to_string());
        }
        args.push("parallel=true".to_string());

        let password = logon.password();
        let masked = std::iter::once(program.display().to_string())
            .chain(args.iter().map(|a| {
                if password.is_empty() {
                    a.clone()
                } else {
                    a.replace(password, "***")
                }
            }))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            program,
            args,
            masked,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full command line with the password masked.
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Run the utility to completion.
    pub async fn run(&self) -> Result<(), OracleBackendError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| OracleBackendError::Spawn {
                utility: UTILITY.to_string(),
                source,
            })?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(OracleBackendError::Exit {
                utility: UTILITY.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }
}
