//! Work partitioning across the worker pool.
//!
//! Splits a record count into contiguous identifier ranges, one per worker.
//! Each range is backed by its own data file so that workers never share a
//! file or an identifier.

use std::ops::Range;
use std::path::{Path, PathBuf};

/// A contiguous slice of the identifier space assigned to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Target table the rows are loaded into.
    pub table: String,
    /// Data file backing this partition.
    pub path: PathBuf,
    /// Number of rows in the partition.
    pub row_count: u64,
    /// First identifier of the partition.
    pub starting_id: u64,
}

impl Partition {
    /// Identifiers covered by this partition.
    pub fn id_range(&self) -> Range<u64> {
        self.starting_id..self.starting_id + self.row_count
    }

    /// First identifier after this partition.
    pub fn end_id(&self) -> u64 {
        self.starting_id + self.row_count
    }

    /// Whether the partition has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Rows assigned to each worker.
///
/// The remainder of the division is not distributed: callers needing exact
/// totals must choose a record count divisible by the worker count.
pub fn per_worker_rows(total_records: u64, worker_count: usize) -> u64 {
    if worker_count == 0 {
        return 0;
    }
    total_records / worker_count as u64
}

/// File name for the partition of worker `index` (1-based).
pub fn partition_file_name(index: usize, rows: u64) -> String {
    format!("People_data_{index}_{rows}.csv")
}

/// Plan the partitions for one generation phase.
///
/// Produces `worker_count` partitions of `floor(total_records / worker_count)`
/// rows each. Partition `k` (1-based) starts at
/// `starting_id + (k - 1) * per_worker` so the ranges are contiguous and never
/// overlap. A worker count larger than the record count yields empty
/// partitions; a worker count of zero yields no partitions.
pub fn plan(
    table: &str,
    total_records: u64,
    worker_count: usize,
    starting_id: u64,
    dir: &Path,
) -> Vec<Partition> {
    let per_worker = per_worker_rows(total_records, worker_count);

    (1..=worker_count)
        .map(|index| Partition {
            table: table.to_string(),
            path: dir.join(partition_file_name(index, per_worker)),
            row_count: per_worker,
            starting_id: starting_id + (index as u64 - 1) * per_worker,
        })
        .collect()
}

/// Total rows across a set of partitions.
pub fn planned_rows(partitions: &[Partition]) -> u64 {
    partitions.iter().map(|p| p.row_count).sum()
}

/// Describe the single partition that results from merging `partitions`.
///
/// The merged file is named after the first worker slot and the summed row
/// count, and starts at the first partition's identifier.
pub fn merged_partition(table: &str, partitions: &[Partition], dir: &Path) -> Partition {
    let rows = planned_rows(partitions);
    let starting_id = partitions.first().map(|p| p.starting_id).unwrap_or(0);
    Partition {
        table: table.to_string(),
        path: dir.join(partition_file_name(1, rows)),
        row_count: rows,
        starting_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir() -> PathBuf {
        PathBuf::from("/tmp/bench")
    }

    #[test]
    fn test_plan_even_split() {
        let partitions = plan("customers_test", 100, 4, 0, &dir());

        assert_eq!(partitions.len(), 4);
        let starts: Vec<u64> = partitions.iter().map(|p| p.starting_id).collect();
        assert_eq!(starts, vec![0, 25, 50, 75]);
        assert!(partitions.iter().all(|p| p.row_count == 25));
        assert_eq!(
            partitions[2].path,
            PathBuf::from("/tmp/bench/People_data_3_25.csv")
        );
        assert_eq!(partitions[0].table, "customers_test");
    }

    #[test]
    fn test_plan_drops_remainder() {
        let partitions = plan("t", 103, 4, 0, &dir());

        assert_eq!(partitions.len(), 4);
        assert_eq!(planned_rows(&partitions), 100);
        assert!(planned_rows(&partitions) <= 103);
    }

    #[test]
    fn test_plan_ranges_are_contiguous() {
        for (total, workers, start) in [(100, 4, 0), (999, 7, 12), (3_342_227, 16, 3_342_228)] {
            let partitions = plan("t", total, workers, start, &dir());

            assert_eq!(partitions.len(), workers);
            assert_eq!(partitions[0].starting_id, start);
            for pair in partitions.windows(2) {
                assert_eq!(pair[0].end_id(), pair[1].starting_id);
            }
            assert_eq!(
                planned_rows(&partitions),
                workers as u64 * (total / workers as u64)
            );
        }
    }

    #[test]
    fn test_plan_no_shared_identifiers() {
        let partitions = plan("t", 50, 3, 10, &dir());
        let mut ids: Vec<u64> = partitions.iter().flat_map(|p| p.id_range()).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), len);
        assert_eq!(len, 48);
    }

    #[test]
    fn test_plan_more_workers_than_records() {
        let partitions = plan("t", 3, 5, 0, &dir());

        assert_eq!(partitions.len(), 5);
        assert!(partitions.iter().all(Partition::is_empty));
    }

    #[test]
    fn test_plan_zero_workers() {
        assert!(plan("t", 100, 0, 0, &dir()).is_empty());
        assert_eq!(per_worker_rows(100, 0), 0);
    }

    #[test]
    fn test_merged_partition() {
        let partitions = plan("t", 100, 4, 200, &dir());
        let merged = merged_partition("t", &partitions, &dir());

        assert_eq!(merged.row_count, 100);
        assert_eq!(merged.starting_id, 200);
        assert_eq!(merged.path, PathBuf::from("/tmp/bench/People_data_1_100.csv"));
    }
}
