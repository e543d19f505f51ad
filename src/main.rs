//! Trace generator driver: one pattern to one file, or the full six-file batch.

use anyhow::{Context, Result};
use cache_trace_gen::trace::{generate_file, read_trace_file};
use cache_trace_gen::{Pattern, TraceSummary};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 5000;

/// Generate synthetic memory-access traces for cache simulator validation.
///
/// With no arguments, writes all six patterns to `<pattern>.txt` in the
/// current directory.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Pattern to generate (omit to run the full batch).
    pattern: Option<Pattern>,
    /// Output file (defaults to `<pattern>.txt`).
    output: Option<PathBuf>,
    /// Number of records to emit.
    count: Option<usize>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

fn run_one(pattern: Pattern, path: PathBuf, count: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    let written = generate_file(pattern, &path, count, &mut rng)
        .with_context(|| format!("failed to write {} trace to {}", pattern.name(), path.display()))?;

    let records = read_trace_file(&path)
        .with_context(|| format!("failed to read back {}", path.display()))?;
    let summary = TraceSummary::from_records(&records);
    info!(
        pattern = pattern.name(),
        path = %path.display(),
        records = written,
        "trace written"
    );
    println!(
        "  {:<11} {:>6} records  stores {:>5.1}%  blocks {:>6}  span {:>9} B",
        pattern.name(),
        summary.records,
        summary.store_fraction() * 100.0,
        summary.distinct_blocks,
        summary.span_bytes(),
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let count = args.count.unwrap_or(DEFAULT_COUNT);

    println!("=== Cache Trace Generator ===\n");

    match args.pattern {
        Some(pattern) => {
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(pattern.default_file_name()));
            run_one(pattern, path, count)?;
        }
        None => {
            for pattern in Pattern::ALL {
                run_one(pattern, PathBuf::from(pattern.default_file_name()), count)?;
            }
        }
    }
    Ok(())
}
