//! Concurrent generation of partition files and baseline merging.

use crate::error::GenerationError;
use crate::seed::SeedPool;
use crate::writer::RecordWriter;
use bench_core::{planned_rows, Partition};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a generation phase.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Rows written across all partitions.
    pub rows_written: u64,
    /// Number of partition files produced.
    pub files: usize,
    /// Wall-clock time of the phase.
    pub duration: Duration,
}

impl GenerationSummary {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Derive the RNG seed of one partition from the run seed.
///
/// Mixing in the starting id keeps partitions distinct while the whole phase
/// stays reproducible for a given run seed.
fn partition_seed(seed: Option<u64>, partition: &Partition) -> Option<u64> {
    seed.map(|s| s ^ partition.starting_id.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Write every partition file using at most `concurrency` threads.
///
/// Workers pull partitions from a shared index until none are left; there
/// is no ordering across partitions. The call returns once every worker has
/// finished. If any partition fails, the first error is returned after all
/// workers have joined.
pub fn generate_all(
    pool: &SeedPool,
    partitions: &[Partition],
    concurrency: usize,
    seed: Option<u64>,
) -> Result<GenerationSummary, GenerationError> {
    let start = Instant::now();
    let threads = concurrency.max(1).min(partitions.len().max(1));
    let next = AtomicUsize::new(0);
    let first_error: Mutex<Option<GenerationError>> = Mutex::new(None);

    info!(
        "Generating {} rows into {} files with {} threads",
        planned_rows(partitions),
        partitions.len(),
        threads
    );

    let rows_written: u64 = std::thread::scope(|scope| {
        let next = &next;
        let first_error = &first_error;
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                scope.spawn(move || {
                    let mut rows = 0u64;
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(partition) = partitions.get(index) else {
                            break;
                        };
                        let mut writer =
                            RecordWriter::new(pool, partition_seed(seed, partition));
                        match writer.write(partition) {
                            Ok(n) => rows += n,
                            Err(e) => {
                                warn!("Generation of {} failed: {e}", partition.path.display());
                                let mut slot = first_error.lock().unwrap_or_else(|p| p.into_inner());
                                slot.get_or_insert(e);
                            }
                        }
                    }
                    rows
                })
            })
            .collect();

        let mut total = 0u64;
        for handle in handles {
            match handle.join() {
                Ok(rows) => total += rows,
                Err(_) => {
                    let mut slot = first_error.lock().unwrap_or_else(|p| p.into_inner());
                    slot.get_or_insert(GenerationError::WorkerPanicked(
                        partitions
                            .first()
                            .map(|p| p.path.clone())
                            .unwrap_or_default(),
                    ));
                }
            }
        }
        total
    });

    if let Some(e) = first_error.into_inner().unwrap_or_else(|p| p.into_inner()) {
        return Err(e);
    }

    let summary = GenerationSummary {
        rows_written,
        files: partitions.len(),
        duration: start.elapsed(),
    };
    info!(
        "Generated {} rows in {:?} ({:.0} rows/sec)",
        summary.rows_written,
        summary.duration,
        summary.rows_per_second()
    );
    Ok(summary)
}

/// Concatenate partition files byte-for-byte, in order, into `target`.
///
/// `target.row_count` and `target.starting_id` are taken from the caller; use
/// [`bench_core::merged_partition`] to build a matching descriptor. Originals
/// are deleted when `delete_originals` is set. A source that shares the
/// target path is never deleted.
pub fn merge(
    partitions: &[Partition],
    target: &Partition,
    delete_originals: bool,
) -> Result<Partition, GenerationError> {
    let start = Instant::now();
    let staging = staging_path(&target.path);

    {
        let file = File::create(&staging).map_err(|e| GenerationError::io(&staging, e))?;
        let mut out = BufWriter::new(file);
        for partition in partitions {
            let mut input =
                File::open(&partition.path).map_err(|e| GenerationError::io(&partition.path, e))?;
            io::copy(&mut input, &mut out).map_err(|e| GenerationError::io(&staging, e))?;
        }
        out.flush().map_err(|e| GenerationError::io(&staging, e))?;
    }

    fs::rename(&staging, &target.path).map_err(|e| GenerationError::io(&target.path, e))?;

    if delete_originals {
        let originals: Vec<Partition> = partitions
            .iter()
            .filter(|p| p.path != target.path)
            .cloned()
            .collect();
        remove_partition_files(&originals)?;
    }

    debug!(
        "Merged {} files into {} in {:?}",
        partitions.len(),
        target.path.display(),
        start.elapsed()
    );
    Ok(target.clone())
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".merging");
    target.with_file_name(name)
}

/// Delete partition files, ignoring ones that are already gone.
pub fn remove_partition_files(partitions: &[Partition]) -> Result<(), GenerationError> {
    for partition in partitions {
        match fs::remove_file(&partition.path) {
            Ok(()) => debug!("Removed {}", partition.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(GenerationError::io(&partition.path, e)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::{merged_partition, plan};
    use std::collections::HashSet;
    use std::fs::OpenOptions;
    use tempfile::TempDir;

    fn append(path: &Path, bytes: &[u8]) {
        let mut f = OpenOptions::new().append(true).open(path).unwrap();
        f.write_all(bytes).unwrap();
    }

    fn ids_in(path: &Path) -> Vec<u64> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.split('|').next().unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_generate_all_writes_every_partition() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(100, Some(42)).unwrap();
        let partitions = plan("customers_test", 1_000, 4, 0, dir.path());

        let summary = generate_all(&pool, &partitions, 4, Some(42)).unwrap();

        assert_eq!(summary.rows_written, 1_000);
        assert_eq!(summary.files, 4);
        let mut seen = HashSet::new();
        for partition in &partitions {
            let ids = ids_in(&partition.path);
            assert_eq!(ids.len() as u64, partition.row_count);
            assert_eq!(ids, partition.id_range().collect::<Vec<_>>());
            for id in ids {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
    }

    #[test]
    fn test_generate_all_fewer_threads_than_partitions() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(10, Some(1)).unwrap();
        let partitions = plan("customers_test", 90, 9, 100, dir.path());

        let summary = generate_all(&pool, &partitions, 2, None).unwrap();

        assert_eq!(summary.rows_written, 90);
        assert!(partitions.iter().all(|p| p.path.exists()));
    }

    #[test]
    fn test_generate_all_reproducible_with_seed() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        let pool = SeedPool::build(100, Some(7)).unwrap();
        let a = plan("customers_test", 40, 2, 0, dir_a.path());
        let b = plan("customers_test", 40, 2, 0, dir_b.path());

        generate_all(&pool, &a, 2, Some(9)).unwrap();
        generate_all(&pool, &b, 1, Some(9)).unwrap();

        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(fs::read(&pa.path).unwrap(), fs::read(&pb.path).unwrap());
        }
    }

    #[test]
    fn test_generate_all_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(10, Some(1)).unwrap();
        let missing = dir.path().join("missing");
        let partitions = plan("customers_test", 20, 2, 0, &missing);

        let err = generate_all(&pool, &partitions, 2, None).unwrap_err();
        assert!(matches!(err, GenerationError::Io { .. }));
    }

    #[test]
    fn test_merge_concatenates_and_deletes() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(50, Some(3)).unwrap();
        let partitions = plan("customers_test", 100, 4, 0, dir.path());
        generate_all(&pool, &partitions, 4, None).unwrap();

        let input_bytes: u64 = partitions
            .iter()
            .map(|p| fs::metadata(&p.path).unwrap().len())
            .sum();
        let target = merged_partition("customers_test", &partitions, dir.path());
        let merged = merge(&partitions, &target, true).unwrap();

        assert_eq!(fs::metadata(&merged.path).unwrap().len(), input_bytes);
        assert_eq!(ids_in(&merged.path), (0..100).collect::<Vec<_>>());
        assert_eq!(merged.row_count, 100);
        assert!(partitions.iter().all(|p| !p.path.exists()));
    }

    #[test]
    fn test_merge_retains_originals() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(50, Some(3)).unwrap();
        let partitions = plan("customers_test", 30, 3, 5, dir.path());
        generate_all(&pool, &partitions, 3, None).unwrap();

        let target = merged_partition("customers_test", &partitions, dir.path());
        merge(&partitions, &target, false).unwrap();

        assert!(partitions.iter().all(|p| p.path.exists()));
        assert_eq!(ids_in(&target.path).len(), 30);
    }

    #[test]
    fn test_merge_single_partition_onto_itself() {
        let dir = TempDir::new().unwrap();
        let pool = SeedPool::build(50, Some(3)).unwrap();
        let partitions = plan("customers_test", 10, 1, 0, dir.path());
        generate_all(&pool, &partitions, 1, None).unwrap();
        let before = fs::read(&partitions[0].path).unwrap();

        let target = merged_partition("customers_test", &partitions, dir.path());
        assert_eq!(target.path, partitions[0].path);
        merge(&partitions, &target, true).unwrap();

        assert_eq!(fs::read(&target.path).unwrap(), before);
    }

    #[test]
    fn test_merge_preserves_partition_order() {
        let dir = TempDir::new().unwrap();
        let partitions = plan("customers_test", 4, 2, 0, dir.path());
        fs::write(&partitions[0].path, "0|a\n").unwrap();
        append(&partitions[0].path, b"1|b\n");
        fs::write(&partitions[1].path, "2|c\n3|d\n").unwrap();

        let target = merged_partition("customers_test", &partitions, dir.path());
        merge(&partitions, &target, false).unwrap();

        assert_eq!(fs::read_to_string(&target.path).unwrap(), "0|a\n1|b\n2|c\n3|d\n");
    }

    #[test]
    fn test_remove_partition_files_ignores_missing() {
        let dir = TempDir::new().unwrap();
        let partitions = plan("customers_test", 4, 2, 0, dir.path());
        fs::write(&partitions[0].path, "x").unwrap();

        remove_partition_files(&partitions).unwrap();
        assert!(!partitions[0].path.exists());
    }
}
