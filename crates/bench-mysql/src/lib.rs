//! MySQL backend for batch-bench.
//!
//! Partition files are loaded with `LOAD DATA LOCAL INFILE`. Each load opens
//! its own connection whose local-infile handler is whitelisted to exactly
//! the partition file being loaded. The server must run with
//! `local_infile=ON`.

mod backend;
pub mod ddl;
mod error;

pub use backend::MySQLBackend;
pub use error::MySQLBackendError;
