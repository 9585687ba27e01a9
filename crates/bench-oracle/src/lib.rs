//! Oracle backend for batch-bench.
//!
//! Oracle has no native bulk-copy protocol reachable from this workspace, so
//! every interaction goes through the client utilities shipped with the
//! database:
//!
//! ```text
//! prepare()  ──▶ customers_test.ctl          (load-control descriptor)
//! load()     ──▶ sqlldr userid=... data=People_data_{k}_{n}.csv control=... log=...
//! schema/update/scan ──▶ sqlplus -S -L /nolog  (script on stdin)
//! cleanup()  ──▶ remove .ctl and .log unless files are kept
//! ```
//!
//! Both utilities are resolved from `$ORACLE_HOME` when it is set and from
//! `PATH` otherwise.

mod backend;
pub mod control;
pub mod ddl;
mod error;
pub mod logon;
pub mod sqlldr;
pub mod sqlplus;

pub use backend::OracleBackend;
pub use error::OracleBackendError;
pub use logon::Logon;

use std::path::PathBuf;

/// Locate an Oracle client utility.
///
/// With `oracle_home` set the utility is expected directly inside it.
pub fn utility_path(oracle_home: Option<&std::path::Path>, utility: &str) -> PathBuf {
    match oracle_home {
        Some(home) => home.join(utility),
        None => PathBuf::from(utility),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_utility_path() {
        assert_eq!(
            utility_path(Some(Path::new("/opt/oracle/instantclient")), "sqlldr"),
            PathBuf::from("/opt/oracle/instantclient/sqlldr")
        );
        assert_eq!(utility_path(None, "sqlplus"), PathBuf::from("sqlplus"));
    }
}
