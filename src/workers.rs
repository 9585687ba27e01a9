//! Bounded pool of concurrent partition loads.

use bench_core::{BulkLoader, LoadMode, Partition};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

/// A partition whose load failed.
#[derive(Debug, Clone)]
pub struct PartitionFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of loading a set of partitions.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Rows reported as loaded by successful partitions.
    pub rows_loaded: u64,
    /// Number of partitions loaded successfully.
    pub succeeded: usize,
    /// Partitions that failed, in completion order.
    pub failures: Vec<PartitionFailure>,
    /// Wall-clock time until the last load finished.
    pub duration: Duration,
}

impl LoadSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_loaded as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Load every partition with at most `concurrency` loads in flight.
///
/// Each partition is loaded exactly once by its own task. A failed or
/// panicking load is logged and recorded; it never cancels sibling loads and
/// is not retried. Returns once every task has finished.
pub async fn load_partitions<L>(
    loader: Arc<L>,
    partitions: Vec<Partition>,
    mode: LoadMode,
    concurrency: usize,
) -> LoadSummary
where
    L: BulkLoader + ?Sized + 'static,
{
    let start = Instant::now();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    info!(
        "Loading {} partitions ({} mode, {} workers)",
        partitions.len(),
        mode,
        concurrency.max(1)
    );

    for partition in partitions {
        let loader = Arc::clone(&loader);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = semaphore.acquire_owned().await.ok();
            let result = AssertUnwindSafe(loader.load(&partition, mode))
                .catch_unwind()
                .await;
            (partition.path, result)
        });
    }

    let mut summary = LoadSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let (path, error) = match joined {
            Ok((_, Ok(Ok(rows)))) => {
                summary.rows_loaded += rows;
                summary.succeeded += 1;
                continue;
            }
            Ok((path, Ok(Err(e)))) => (path, e.to_string()),
            Ok((path, Err(_))) => (path, "load task panicked".to_string()),
            Err(e) => (PathBuf::new(), format!("load task failed: {e}")),
        };
        error!("Failed to load {}: {}", path.display(), error);
        summary.failures.push(PartitionFailure { path, error });
    }

    summary.duration = start.elapsed();
    summary
}
