//! Core types for the batch-bench ingestion benchmark.
//!
//! This crate provides the foundational types shared by the generator, the
//! backend crates and the phase orchestrator:
//!
//! - [`SeedRecord`] - One synthetic customer profile and the fixed column layout
//! - [`Partition`] - A contiguous identifier range backed by one data file
//! - [`plan`] - Splits a record count across a fixed worker pool
//! - [`LoadMode`] - Whether the target table carries constraints yet
//! - [`BulkLoader`], [`SchemaManager`], [`QueryWorkload`] - Backend capabilities
//!
//! # Architecture
//!
//! ```text
//! bench-core (this crate)
//!    │
//!    ├─── bench-generator   (seed pool, record writer, parallel generation)
//!    │
//!    ├─── bench-postgresql  (COPY FROM STDIN)
//!    ├─── bench-mysql       (LOAD DATA LOCAL INFILE)
//!    └─── bench-oracle      (SQL*Loader / SQL*Plus)
//! ```

pub mod connection;
pub mod error;
pub mod mode;
pub mod partition;
pub mod record;
pub mod table;
pub mod traits;

pub use connection::{mask_connection_password, ConnectionSettings, ConnectionTarget};
pub use error::{BoxError, LoadError, SetupError};
pub use mode::LoadMode;
pub use partition::{
    merged_partition, partition_file_name, per_worker_rows, plan, planned_rows, Partition,
};
pub use record::{is_field_safe, sanitize_field, SeedRecord, COLUMNS, FIELD_DELIMITER};
pub use table::{
    add_primary_key_statement, scan_statement, update_statement, IndexDefinition, DEFAULT_INDEXES,
    PRIMARY_KEY_COLUMN, TABLE_NAME,
};
pub use traits::{Backend, BulkLoader, QueryWorkload, SchemaManager};
