//! Synthetic data generation for batch-bench.
//!
//! This crate turns a plan of [`bench_core::Partition`]s into data files on
//! local storage. Rows are drawn with replacement from a bounded
//! [`SeedPool`] of realistic en-GB customer profiles; only the identifier
//! changes from row to row, which keeps generation far cheaper than the load
//! it feeds.
//!
//! # Architecture
//!
//! ```text
//! SeedPool::build(size, seed)
//!        │  (read-only, shared via Arc)
//!        ▼
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │ generate_all         │─────▶│ RecordWriter (xN)    │──▶ People_data_{k}_{n}.csv
//! │ (bounded thread pool)│      │ one per partition    │
//! └──────────────────────┘      └──────────────────────┘
//!        │
//!        ▼ (baseline phase only)
//!   merge ──▶ People_data_1_{total}.csv
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bench_core::plan;
//! use bench_generator::{generate_all, SeedPool};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let pool = Arc::new(SeedPool::build(10_000, Some(42)).unwrap());
//! let partitions = plan("customers_test", 1_000, 4, 0, Path::new("."));
//! let summary = generate_all(&pool, &partitions, 4, Some(42)).unwrap();
//! assert_eq!(summary.rows_written, 1_000);
//! ```

mod error;
pub mod parallel;
pub mod profile;
pub mod seed;
mod vocab;
pub mod writer;

pub use error::GenerationError;
pub use parallel::{generate_all, merge, remove_partition_files, GenerationSummary};
pub use seed::SeedPool;
pub use writer::RecordWriter;
