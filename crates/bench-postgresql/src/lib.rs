//! PostgreSQL backend for batch-bench.
//!
//! Partition files are streamed to the server with `COPY ... FROM STDIN`
//! inside a transaction, one connection per partition. Schema mutations and
//! the update/scan workload each run on a short-lived connection of their own.

mod backend;
mod copy;
pub mod ddl;
mod error;

pub use backend::PostgreSQLBackend;
pub use copy::COPY_CHUNK_SIZE;
pub use error::PostgreSQLBackendError;
