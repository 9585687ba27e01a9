//! The bounded pool of pre-generated customer profiles.

use crate::error::GenerationError;
use crate::profile::generate_profile;
use bench_core::SeedRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// A fixed-size, read-only set of synthetic records sampled with replacement.
///
/// One pool is built per run. It is never mutated after construction, so it
/// can be shared across generator threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct SeedPool {
    records: Vec<SeedRecord>,
}

impl SeedPool {
    /// Default number of records in the pool.
    pub const DEFAULT_SIZE: usize = 10_000;

    /// Build a pool of `pool_size` profiles.
    ///
    /// With a seed the pool content is deterministic; without one it is drawn
    /// from OS entropy.
    pub fn build(pool_size: usize, seed: Option<u64>) -> Result<Self, GenerationError> {
        if pool_size == 0 {
            return Err(GenerationError::EmptySeedPool);
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let records: Vec<SeedRecord> = (0..pool_size).map(|_| generate_profile(&mut rng)).collect();

        debug!("Built seed pool with {} records (seed={:?})", records.len(), seed);
        Ok(Self { records })
    }

    /// Build a pool from existing records.
    pub fn from_records(records: Vec<SeedRecord>) -> Result<Self, GenerationError> {
        if records.is_empty() {
            return Err(GenerationError::EmptySeedPool);
        }
        Ok(Self { records })
    }

    /// Pick one record uniformly at random.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &SeedRecord {
        &self.records[rng.gen_range(0..self.records.len())]
    }

    /// Number of records in the pool.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: an empty pool cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in the pool.
    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }
}
