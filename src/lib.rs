//! batch-bench library
//!
//! Measures bulk ingestion into PostgreSQL, MySQL and Oracle. A run generates
//! synthetic customer records into partition files, then times a fixed
//! sequence of loads, index creation and queries against one backend.
//!
//! # Phases
//!
//! ```text
//! BuildSeedPool → GenerateBaseline → MergeBaseline → CreateTable
//!   → LoadBaseline       (single file, no constraints)
//!   → GenerateParallel1 → LoadParallel1 (N files, no constraints)
//!   → CreateIndexes      (primary key + 3 secondary indexes)
//!   → GenerateParallel2 → LoadParallel2 (N files, constrained)
//!   → Update → Scan → Done
//! ```
//!
//! Each generation phase continues the identifier sequence of the previous
//! one, so the three loaded datasets never collide on the primary key.
//!
//! # Crates
//!
//! - `bench_core` - shared types and the backend capability traits
//! - `bench_generator` - seed pool, record writer, parallel generation
//! - `bench_postgresql`, `bench_mysql`, `bench_oracle` - backend families
//!
//! # CLI Usage
//!
//! ```bash
//! batch-bench -t postgresql -u bench -p secret --hostname localhost -d benchdb \
//!   --size 0.1 --threads 8
//! ```

pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod phase;
pub mod report;
pub mod target;
pub mod workers;

pub use config::{BenchArgs, BenchConfig, ConnectionOpts, BASELINE_RECORDS};
pub use orchestrator::PhaseOrchestrator;
pub use phase::{Phase, PhaseOutcome, PhaseRecord};
pub use report::{format_table, write_json, BenchmarkReport};
pub use target::{create_backend, BackendKind};
pub use workers::{load_partitions, LoadSummary, PartitionFailure};
