//! Benchmark phases and their recorded outcomes.

use bench_core::LoadMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One step of the benchmark, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BuildSeedPool,
    GenerateBaseline,
    MergeBaseline,
    CreateTable,
    LoadBaseline,
    GenerateParallel1,
    LoadParallel1,
    CreateIndexes,
    GenerateParallel2,
    LoadParallel2,
    Update,
    Scan,
    Done,
}

impl Phase {
    /// Every executable phase, in order.
    pub const SEQUENCE: [Phase; 12] = [
        Phase::BuildSeedPool,
        Phase::GenerateBaseline,
        Phase::MergeBaseline,
        Phase::CreateTable,
        Phase::LoadBaseline,
        Phase::GenerateParallel1,
        Phase::LoadParallel1,
        Phase::CreateIndexes,
        Phase::GenerateParallel2,
        Phase::LoadParallel2,
        Phase::Update,
        Phase::Scan,
    ];

    /// The phase that follows this one. `Done` is terminal.
    pub fn next(self) -> Phase {
        match self {
            Phase::BuildSeedPool => Phase::GenerateBaseline,
            Phase::GenerateBaseline => Phase::MergeBaseline,
            Phase::MergeBaseline => Phase::CreateTable,
            Phase::CreateTable => Phase::LoadBaseline,
            Phase::LoadBaseline => Phase::GenerateParallel1,
            Phase::GenerateParallel1 => Phase::LoadParallel1,
            Phase::LoadParallel1 => Phase::CreateIndexes,
            Phase::CreateIndexes => Phase::GenerateParallel2,
            Phase::GenerateParallel2 => Phase::LoadParallel2,
            Phase::LoadParallel2 => Phase::Update,
            Phase::Update => Phase::Scan,
            Phase::Scan | Phase::Done => Phase::Done,
        }
    }

    /// Whether the phase duration is part of the headline total.
    ///
    /// Generation, merging and table creation are excluded.
    pub fn counts_toward_total(self) -> bool {
        matches!(
            self,
            Phase::LoadBaseline
                | Phase::LoadParallel1
                | Phase::CreateIndexes
                | Phase::LoadParallel2
                | Phase::Update
                | Phase::Scan
        )
    }

    /// Load mode of a load phase.
    pub fn load_mode(self) -> Option<LoadMode> {
        match self {
            Phase::LoadBaseline | Phase::LoadParallel1 => Some(LoadMode::Unconstrained),
            Phase::LoadParallel2 => Some(LoadMode::Constrained),
            _ => None,
        }
    }

    /// Human-readable description used in console output.
    pub fn description(self) -> &'static str {
        match self {
            Phase::BuildSeedPool => "Build seed pool",
            Phase::GenerateBaseline => "Generate baseline data",
            Phase::MergeBaseline => "Merge baseline files",
            Phase::CreateTable => "Create table",
            Phase::LoadBaseline => "Serial load, no indexes",
            Phase::GenerateParallel1 => "Generate parallel data (1)",
            Phase::LoadParallel1 => "Parallel load, no indexes",
            Phase::CreateIndexes => "Create primary key and indexes",
            Phase::GenerateParallel2 => "Generate parallel data (2)",
            Phase::LoadParallel2 => "Parallel load, with indexes",
            Phase::Update => "Update",
            Phase::Scan => "Scan",
            Phase::Done => "Done",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// How a phase ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseOutcome {
    Succeeded,
    /// Some partitions of a load phase failed; the run continued.
    Degraded {
        failed_partitions: usize,
        errors: Vec<String>,
    },
    /// The phase failed and the run stopped.
    Failed { error: String },
}

impl PhaseOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseOutcome::Failed { .. })
    }
}

/// Timing and outcome of one executed phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    pub outcome: PhaseOutcome,
    /// Rows generated, loaded, updated or counted, where meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    pub counts_toward_total: bool,
}

impl PhaseRecord {
    pub fn new(phase: Phase, duration: Duration, outcome: PhaseOutcome, rows: Option<u64>) -> Self {
        Self {
            phase,
            duration,
            outcome,
            rows,
            counts_toward_total: phase.counts_toward_total(),
        }
    }
}

/// Serialize a `Duration` as fractional seconds.
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
