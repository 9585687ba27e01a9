//! Sequential phase execution.
//!
//! The orchestrator owns the run: it walks [`Phase`] from `BuildSeedPool` to
//! `Done`, times each phase independently and stops at the first fatal
//! failure. Load phases that lose individual partitions are recorded as
//! degraded and the run carries on.

use crate::config::BenchConfig;
use crate::phase::{Phase, PhaseOutcome, PhaseRecord};
use crate::report::BenchmarkReport;
use crate::workers::load_partitions;
use anyhow::{Context, Result};
use bench_core::{
    merged_partition, plan, planned_rows, Backend, BulkLoader, Partition, QueryWorkload,
    SchemaManager, DEFAULT_INDEXES,
};
use bench_generator::{generate_all, merge, remove_partition_files, SeedPool};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

type Observer = Box<dyn Fn(&PhaseRecord) + Send + Sync>;

/// What a phase produced, before timing is attached.
struct PhaseResult {
    rows: Option<u64>,
    outcome: PhaseOutcome,
}

impl PhaseResult {
    fn succeeded(rows: Option<u64>) -> Self {
        Self {
            rows,
            outcome: PhaseOutcome::Succeeded,
        }
    }
}

/// Drives one benchmark run against one backend.
pub struct PhaseOrchestrator {
    config: BenchConfig,
    backend: Arc<dyn Backend>,
    observer: Option<Observer>,
    pool: Option<Arc<SeedPool>>,
    /// First identifier of the next generation phase.
    next_start: u64,
    /// Partitions generated and not yet loaded.
    pending: Vec<Partition>,
}

impl PhaseOrchestrator {
    pub fn new(config: BenchConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            config,
            backend,
            observer: None,
            pool: None,
            next_start: 0,
            pending: Vec::new(),
        }
    }

    /// Call `observer` with each phase record as soon as the phase ends.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&PhaseRecord) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Run every phase and return the report.
    ///
    /// A fatal error ends the run early; the report then holds the phases
    /// executed so far, the failed phase last, and the error in `failure`.
    pub async fn run(mut self) -> BenchmarkReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut phases = Vec::with_capacity(Phase::SEQUENCE.len());
        let mut failure = None;

        info!(
            "Starting {} benchmark: {} records per phase, {} workers",
            self.backend.name(),
            self.config.total_records,
            self.config.workers
        );

        let mut phase = Phase::BuildSeedPool;
        while phase != Phase::Done {
            info!("Phase started: {}", phase);
            let phase_start = Instant::now();
            let result = self.execute(phase).await;
            let duration = phase_start.elapsed();

            let record = match result {
                Ok(PhaseResult { rows, outcome }) => {
                    PhaseRecord::new(phase, duration, outcome, rows)
                }
                Err(e) => {
                    error!("Phase failed: {}: {:#}", phase, e);
                    failure = Some(format!("{phase}: {e:#}"));
                    PhaseRecord::new(
                        phase,
                        duration,
                        PhaseOutcome::Failed {
                            error: format!("{e:#}"),
                        },
                        None,
                    )
                }
            };
            info!("Phase finished: {} in {:?}", phase, duration);

            if let Some(observer) = &self.observer {
                observer(&record);
            }
            let failed = record.outcome.is_failed();
            phases.push(record);
            if failed {
                break;
            }

            if phase.load_mode().is_some() {
                self.discard_pending();
            }
            phase = phase.next();
        }

        self.finish().await;

        BenchmarkReport {
            backend: self.config.backend,
            scale: self.config.scale,
            workers: self.config.workers,
            planned_records: self.config.total_records,
            phases,
            elapsed: start.elapsed(),
            started_at,
            finished_at: Utc::now(),
            failure,
        }
    }

    async fn execute(&mut self, phase: Phase) -> Result<PhaseResult> {
        match phase {
            Phase::BuildSeedPool => self.build_seed_pool().await,
            Phase::GenerateBaseline | Phase::GenerateParallel1 | Phase::GenerateParallel2 => {
                self.generate().await
            }
            Phase::MergeBaseline => self.merge_baseline().await,
            Phase::CreateTable => {
                self.backend
                    .prepare()
                    .await
                    .context("Failed to prepare loader")?;
                self.backend
                    .recreate_table()
                    .await
                    .context("Failed to recreate table")?;
                Ok(PhaseResult::succeeded(None))
            }
            Phase::LoadBaseline | Phase::LoadParallel1 | Phase::LoadParallel2 => {
                self.load(phase).await
            }
            Phase::CreateIndexes => {
                self.backend
                    .add_primary_key()
                    .await
                    .context("Failed to add primary key")?;
                for index in &DEFAULT_INDEXES {
                    self.backend
                        .add_index(index)
                        .await
                        .with_context(|| format!("Failed to create index {}", index.name))?;
                }
                Ok(PhaseResult::succeeded(None))
            }
            Phase::Update => {
                let rows = self.backend.update().await.context("Update failed")?;
                info!("Updated {} rows", rows);
                Ok(PhaseResult::succeeded(Some(rows)))
            }
            Phase::Scan => {
                let rows = self.backend.scan().await.context("Scan failed")?;
                info!("Scan counted {} rows", rows);
                Ok(PhaseResult::succeeded(Some(rows)))
            }
            Phase::Done => Ok(PhaseResult::succeeded(None)),
        }
    }

    async fn build_seed_pool(&mut self) -> Result<PhaseResult> {
        let size = self.config.seed_pool_size;
        let seed = self.config.seed;
        let pool = tokio::task::spawn_blocking(move || SeedPool::build(size, seed))
            .await
            .context("Seed pool task failed")??;
        info!("Built seed pool of {} profiles", pool.len());
        self.pool = Some(Arc::new(pool));
        Ok(PhaseResult::succeeded(Some(size as u64)))
    }

    async fn generate(&mut self) -> Result<PhaseResult> {
        let pool = self
            .pool
            .clone()
            .context("Seed pool has not been built")?;
        let partitions = plan(
            &self.config.table,
            self.config.total_records,
            self.config.workers,
            self.next_start,
            &self.config.work_dir,
        );
        debug!(
            "Planned {} partitions starting at id {}",
            partitions.len(),
            self.next_start
        );
        self.next_start += planned_rows(&partitions);

        // Tracked before writing so partial output is removed on failure.
        self.pending = partitions.clone();

        let workers = self.config.workers;
        let seed = self.config.seed;
        let summary =
            tokio::task::spawn_blocking(move || generate_all(&pool, &partitions, workers, seed))
                .await
                .context("Generation task failed")??;
        info!(
            "Generated {} rows in {} files ({:.1} rows/sec)",
            summary.rows_written,
            summary.files,
            summary.rows_per_second()
        );

        Ok(PhaseResult::succeeded(Some(summary.rows_written)))
    }

    async fn merge_baseline(&mut self) -> Result<PhaseResult> {
        let parts = std::mem::take(&mut self.pending);
        let target = merged_partition(&self.config.table, &parts, &self.config.work_dir);
        let delete_originals = !self.config.keep_files;

        let sources = parts.clone();
        let result = tokio::task::spawn_blocking(move || merge(&sources, &target, delete_originals))
            .await
            .context("Merge task failed")?;
        let merged = match result {
            Ok(merged) => merged,
            Err(e) => {
                self.pending = parts;
                return Err(e.into());
            }
        };
        info!(
            "Merged {} files into {}",
            parts.len(),
            merged.path.display()
        );

        let rows = merged.row_count;
        self.pending = vec![merged];
        Ok(PhaseResult::succeeded(Some(rows)))
    }

    async fn load(&mut self, phase: Phase) -> Result<PhaseResult> {
        let mode = phase
            .load_mode()
            .context("Phase does not load data")?;
        let summary = load_partitions(
            Arc::clone(&self.backend),
            self.pending.clone(),
            mode,
            self.config.workers,
        )
        .await;
        info!(
            "Loaded {} rows from {} partitions ({:.1} rows/sec)",
            summary.rows_loaded,
            summary.succeeded,
            summary.rows_per_second()
        );

        let outcome = if summary.is_complete() {
            PhaseOutcome::Succeeded
        } else {
            warn!(
                "{} of {} partitions failed to load",
                summary.failures.len(),
                summary.failures.len() + summary.succeeded
            );
            PhaseOutcome::Degraded {
                failed_partitions: summary.failures.len(),
                errors: summary
                    .failures
                    .iter()
                    .map(|f| format!("{}: {}", f.path.display(), f.error))
                    .collect(),
            }
        };
        Ok(PhaseResult {
            rows: Some(summary.rows_loaded),
            outcome,
        })
    }

    /// Delete generated files that are no longer needed, unless kept.
    fn discard_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if self.config.keep_files || pending.is_empty() {
            return;
        }
        if let Err(e) = remove_partition_files(&pending) {
            warn!("Failed to remove data files: {}", e);
        }
    }

    async fn finish(&mut self) {
        self.discard_pending();
        if let Err(e) = self.backend.cleanup().await {
            warn!("Loader cleanup failed: {}", e);
        }
    }
}
