//! Partition file writer.

use crate::error::GenerationError;
use crate::seed::SeedPool;
use bench_core::{Partition, FIELD_DELIMITER};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;
use tracing::debug;

/// Default buffer size for partition file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 16;

/// Writes the rows of one partition to its data file.
///
/// Each row is a record sampled from the pool with its identifier replaced
/// by the next identifier of the partition. Rows are `|`-delimited, unquoted,
/// `\n`-terminated and there is no header line.
pub struct RecordWriter<'a, R: Rng = StdRng> {
    pool: &'a SeedPool,
    rng: R,
}

impl<'a> RecordWriter<'a, StdRng> {
    /// Create a writer drawing from `pool`, seeded when `seed` is given.
    pub fn new(pool: &'a SeedPool, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { pool, rng }
    }
}

impl<'a, R: Rng> RecordWriter<'a, R> {
    /// Create a writer with an explicit RNG.
    pub fn with_rng(pool: &'a SeedPool, rng: R) -> Self {
        Self { pool, rng }
    }

    /// Create or truncate the partition file and write all of its rows.
    ///
    /// On error the file may be left truncated; it must not be loaded.
    pub fn write(&mut self, partition: &Partition) -> Result<u64, GenerationError> {
        let start = Instant::now();
        let path = &partition.path;

        let file = File::create(path).map_err(|e| GenerationError::io(path, e))?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(buf_writer);

        let mut rows_written = 0u64;
        for id in partition.id_range() {
            let record = self.pool.sample(&mut self.rng);
            debug_assert!(record.is_delimiter_safe());

            let id = id.to_string();
            let fields = record.fields();
            writer
                .write_record(std::iter::once(id.as_str()).chain(fields.iter().copied()))
                .map_err(|e| GenerationError::csv(path, e))?;
            rows_written += 1;
        }

        writer.flush().map_err(|e| GenerationError::io(path, e))?;

        debug!(
            "Wrote {} rows to {} in {:?}",
            rows_written,
            path.display(),
            start.elapsed()
        );
        Ok(rows_written)
    }
}
