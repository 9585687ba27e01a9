//! Backend capability traits.
//!
//! Each backend family implements all three traits on one type and is
//! selected once at startup. Orchestration only ever talks to these traits,
//! never to a concrete backend.

use crate::error::{LoadError, SetupError};
use crate::mode::LoadMode;
use crate::partition::Partition;
use crate::table::IndexDefinition;
use async_trait::async_trait;

/// Loads partition files into the target table.
///
/// `load` is called concurrently for distinct partitions of the same table and
/// must open its own connection per call. It is never called twice
/// concurrently for the same partition.
#[async_trait]
pub trait BulkLoader: Send + Sync {
    /// Prepare run-level artifacts (e.g. a load-control descriptor).
    async fn prepare(&self) -> Result<(), SetupError> {
        Ok(())
    }

    /// Load one partition file, returning the number of rows loaded.
    async fn load(&self, partition: &Partition, mode: LoadMode) -> Result<u64, LoadError>;

    /// Remove run-level artifacts created by [`BulkLoader::prepare`].
    async fn cleanup(&self) -> Result<(), SetupError> {
        Ok(())
    }
}

/// Discrete schema mutations. None of these may run concurrently with a load.
#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Drop the table if present, then create it. Running it twice must succeed.
    async fn recreate_table(&self) -> Result<(), SetupError>;

    /// Add the primary key as its own statement.
    async fn add_primary_key(&self) -> Result<(), SetupError>;

    /// Add one secondary index as its own statement.
    async fn add_index(&self, index: &IndexDefinition) -> Result<(), SetupError>;
}

/// The query phases run after all loads.
#[async_trait]
pub trait QueryWorkload: Send + Sync {
    /// Run the update statement, returning the number of affected rows.
    async fn update(&self) -> Result<u64, SetupError>;

    /// Run the scan query, returning the counted rows.
    async fn scan(&self) -> Result<u64, SetupError>;
}

/// A complete backend family.
pub trait Backend: BulkLoader + SchemaManager + QueryWorkload {
    /// Display name used in logs and reports.
    fn name(&self) -> &'static str;
}
