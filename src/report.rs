//! Benchmark report and console rendering.

use crate::phase::{duration_secs, PhaseOutcome, PhaseRecord};
use crate::target::BackendKind;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Result of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub backend: BackendKind,
    pub scale: f64,
    pub workers: usize,
    /// Records planned per generation phase.
    pub planned_records: u64,
    /// Executed phases, in order. A failed run ends with its failed phase.
    pub phases: Vec<PhaseRecord>,
    /// Wall-clock time of the whole run, helpers included.
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// The fatal error that stopped the run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl BenchmarkReport {
    /// Sum of the durations of the phases that count toward the total.
    pub fn headline_total(&self) -> Duration {
        self.phases
            .iter()
            .filter(|r| r.counts_toward_total)
            .map(|r| r.duration)
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Rows loaded across all load phases.
    pub fn rows_loaded(&self) -> u64 {
        self.phases
            .iter()
            .filter(|r| r.phase.load_mode().is_some())
            .filter_map(|r| r.rows)
            .sum()
    }

    pub fn degraded_phases(&self) -> usize {
        self.phases
            .iter()
            .filter(|r| matches!(r.outcome, PhaseOutcome::Degraded { .. }))
            .count()
    }
}

/// Format the report as a table.
pub fn format_table(report: &BenchmarkReport) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Phase", "Rows", "Duration", "Rows/sec", "Status"]);

    for record in &report.phases {
        let secs = record.duration.as_secs_f64();
        let rows = record
            .rows
            .map(format_number)
            .unwrap_or_else(|| "-".to_string());
        let rows_per_sec = match record.rows {
            Some(rows) if record.phase.load_mode().is_some() && secs > 0.0 => {
                format!("{:.1}", rows as f64 / secs)
            }
            _ => "-".to_string(),
        };

        let duration_cell = if record.counts_toward_total {
            Cell::new(format_duration(secs)).fg(Color::Red)
        } else {
            Cell::new(format_duration(secs)).fg(Color::DarkGrey)
        };

        let status_cell = match &record.outcome {
            PhaseOutcome::Succeeded => Cell::new("OK").fg(Color::Green),
            PhaseOutcome::Degraded {
                failed_partitions, ..
            } => Cell::new(format!("DEGRADED ({failed_partitions} failed)")).fg(Color::Yellow),
            PhaseOutcome::Failed { .. } => Cell::new("FAILED").fg(Color::Red),
        };

        table.add_row(vec![
            Cell::new(record.phase.description()),
            Cell::new(rows),
            duration_cell,
            Cell::new(rows_per_sec),
            status_cell,
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan),
        Cell::new(format_number(report.rows_loaded())),
        Cell::new(format!(
            "{}*",
            format_duration(report.headline_total().as_secs_f64())
        ))
        .fg(Color::Cyan),
        Cell::new("-"),
        if report.is_success() {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("FAILED").fg(Color::Red)
        },
    ]);

    output.push_str(&format!(
        "{} benchmark, scale {}, {} workers, {} records per phase\n",
        report.backend,
        report.scale,
        report.workers,
        format_number(report.planned_records)
    ));
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n* Loads, index creation, update and scan only (wall clock {})\n",
        format_duration(report.elapsed.as_secs_f64())
    ));

    let degraded: Vec<&PhaseRecord> = report
        .phases
        .iter()
        .filter(|r| matches!(r.outcome, PhaseOutcome::Degraded { .. }))
        .collect();
    if !degraded.is_empty() {
        output.push_str("\nFailed Partitions:\n");
        for record in degraded {
            if let PhaseOutcome::Degraded { errors, .. } = &record.outcome {
                for error in errors {
                    output.push_str(&format!("  {}: {}\n", record.phase, error));
                }
            }
        }
    }

    if let Some(ref failure) = report.failure {
        output.push_str(&format!("\nRun stopped: {failure}\n"));
    }

    output
}

/// Write the report as pretty-printed JSON.
pub fn write_json(report: &BenchmarkReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Format duration in human-readable format.
pub fn format_duration(secs: f64) -> String {
    if (secs * 10.0).round() < 600.0 {
        return format!("{secs:.1}s");
    }
    let whole = secs.round() as u64;
    if whole < 3600 {
        format!("{}m {:02}s", whole / 60, whole % 60)
    } else {
        let mins = whole / 60;
        format!("{}h {:02}m", mins / 60, mins % 60)
    }
}

/// Format number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;
    use tempfile::TempDir;

    fn record(phase: Phase, secs: u64, rows: Option<u64>) -> PhaseRecord {
        PhaseRecord::new(
            phase,
            Duration::from_secs(secs),
            PhaseOutcome::Succeeded,
            rows,
        )
    }

    fn report() -> BenchmarkReport {
        let now = Utc::now();
        BenchmarkReport {
            backend: BackendKind::PostgreSQL,
            scale: 0.001,
            workers: 2,
            planned_records: 3342,
            phases: vec![
                record(Phase::BuildSeedPool, 1, None),
                record(Phase::GenerateBaseline, 2, Some(3342)),
                record(Phase::MergeBaseline, 1, Some(3342)),
                record(Phase::CreateTable, 1, None),
                record(Phase::LoadBaseline, 10, Some(3342)),
                record(Phase::GenerateParallel1, 2, Some(3342)),
                record(Phase::LoadParallel1, 5, Some(3342)),
                record(Phase::CreateIndexes, 3, None),
                record(Phase::GenerateParallel2, 2, Some(3342)),
                PhaseRecord::new(
                    Phase::LoadParallel2,
                    Duration::from_secs(7),
                    PhaseOutcome::Degraded {
                        failed_partitions: 1,
                        errors: vec!["People_data_2_1671.csv: connection refused".to_string()],
                    },
                    Some(1671),
                ),
                record(Phase::Update, 4, Some(12)),
                record(Phase::Scan, 1, Some(300)),
            ],
            elapsed: Duration::from_secs(39),
            started_at: now,
            finished_at: now,
            failure: None,
        }
    }

    #[test]
    fn test_headline_total_sums_counted_phases() {
        let report = report();
        assert_eq!(report.headline_total(), Duration::from_secs(10 + 5 + 3 + 7 + 4 + 1));
    }

    #[test]
    fn test_rows_loaded() {
        assert_eq!(report().rows_loaded(), 3342 + 3342 + 1671);
        assert_eq!(report().degraded_phases(), 1);
    }

    #[test]
    fn test_format_table() {
        let output = format_table(&report());
        assert!(output.contains("Serial load, no indexes"));
        assert!(output.contains("DEGRADED (1 failed)"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("30.0s*"));
        assert!(output.contains("connection refused"));
        assert!(!output.contains("Run stopped"));
    }

    #[test]
    fn test_format_table_failed_run() {
        let mut report = report();
        report.phases.truncate(8);
        report.phases[7].outcome = PhaseOutcome::Failed {
            error: "duplicate key".to_string(),
        };
        report.failure = Some("Create primary key and indexes: duplicate key".to_string());

        let output = format_table(&report);
        assert!(output.contains("FAILED"));
        assert!(output.contains("Run stopped: Create primary key and indexes: duplicate key"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        write_json(&report(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["backend"], "postgresql");
        assert_eq!(value["phases"].as_array().unwrap().len(), 12);
        assert!(value.get("failure").is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5.5), "5.5s");
        assert_eq!(format_duration(65.0), "1m 05s");
        assert_eq!(format_duration(3661.0), "1h 01m");
    }

    #[test]
    fn test_format_duration_carries_rounded_seconds() {
        assert_eq!(format_duration(119.7), "2m 00s");
        assert_eq!(format_duration(59.96), "1m 00s");
        assert_eq!(format_duration(3599.6), "1h 00m");
        assert_eq!(format_duration(7199.0), "1h 59m");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(100), "100");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(3342227), "3,342,227");
    }
}
