//! Command-line interface for batch-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # PostgreSQL at full scale with 8 workers
//! batch-bench -t postgresql -u bench -p secret \
//!   --hostname localhost:5432 -d benchdb --threads 8
//!
//! # MySQL at a tenth of the baseline, keeping the generated files
//! batch-bench -t mysql -u root -p root \
//!   --hostname 127.0.0.1 -d benchdb -s 0.1 --threads 4 --dont-delete
//!
//! # Oracle through a full connect descriptor, JSON report
//! ORACLE_HOME=/opt/oracle batch-bench -t oracle -u soe -p soe \
//!   --connection-string dbhost:1521/orclpdb --threads 16 \
//!   --report-json results.json
//! ```

use anyhow::Context;
use batch_bench::logging::init_logging;
use batch_bench::report::format_duration;
use batch_bench::{create_backend, format_table, write_json, BenchArgs, PhaseOrchestrator};
use clap::Parser;

#[derive(Parser)]
#[command(name = "batch-bench")]
#[command(about = "Benchmark bulk data ingestion into PostgreSQL, MySQL and Oracle")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    args: BenchArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.args.debug);

    let report_json = cli.args.report_json.clone();
    let config = cli
        .args
        .into_config()
        .context("Invalid benchmark configuration")?;
    let backend = create_backend(&config).context("Failed to configure backend")?;

    println!("{}", "=".repeat(60));
    println!("batch-bench: {} bulk ingestion", backend.name());
    println!("  Target:    {}", config.connection.describe());
    println!("  Scale:     {}", config.scale);
    println!("  Records:   {} per phase", config.total_records);
    println!("  Workers:   {}", config.workers);
    println!("  Work dir:  {}", config.work_dir.display());
    println!("{}", "=".repeat(60));

    let report = PhaseOrchestrator::new(config, backend)
        .with_observer(|record| {
            let counted = if record.counts_toward_total { "" } else { " (untimed)" };
            println!(
                "{:<35} {:>10}{}",
                record.phase.description(),
                format_duration(record.duration.as_secs_f64()),
                counted
            );
        })
        .run()
        .await;

    println!();
    println!("{}", format_table(&report));

    if let Some(path) = report_json {
        write_json(&report, &path)?;
        println!("Report written to {}", path.display());
    }

    if let Some(failure) = report.failure {
        anyhow::bail!("Benchmark stopped early: {failure}");
    }
    Ok(())
}
