//! `size-sweep` — competition outcomes across cell sizes and pulse periods.
//!
//! Either a Cartesian grid (`--sizes-i`, `--sizes-j`, `--periods`) or `--random N`
//! log-uniform size pairs.  Writes `summary.csv` and, with `--trajectories`,
//! one trajectory file per successful combination.
//!
//! Run with:
//!   cargo run -p size-sweep --release -- --sizes-i 1,10,100 --sizes-j 1000,10000 --periods 7,14,28

// mimalloc keeps per-thread allocation cheap across the worker pool.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use memory_stats::memory_stats;
use serde::de::DeserializeOwned;

use pp_core::MetaParameters;
use pp_output::{write_summary_csv, write_trajectory_csv};
use pp_sim::{RunConfig, SampleSpec};
use pp_sweep::{SweepOutcome, SweepRunner, SweepSpec};

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

#[derive(Parser)]
#[command(name = "size-sweep")]
#[command(about = "Sweep cell sizes and pulse periods for two-strain competition", long_about = None)]
struct Cli {
    /// Sizes of strain i, µm³ (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 10.0, 100.0])]
    sizes_i: Vec<f64>,
    /// Sizes of strain j, µm³ (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1_000.0, 10_000.0, 100_000.0])]
    sizes_j: Vec<f64>,
    /// Pulse periods, days (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [7.0, 14.0, 28.0])]
    periods: Vec<f64>,
    /// Draw N random size pairs instead of the grid
    #[arg(long)]
    random: Option<usize>,
    /// Smallest size for --random
    #[arg(long, default_value_t = 1.0)]
    size_min: f64,
    /// Largest size for --random
    #[arg(long, default_value_t = 1.0e6)]
    size_max: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Worker threads; default is one fewer than the available cores
    #[arg(long)]
    threads: Option<usize>,
    /// Run length in days; overrides the config's sample times
    #[arg(long)]
    days: Option<f64>,
    /// JSON file with metaparameters
    #[arg(long)]
    meta: Option<PathBuf>,
    /// JSON file with the run config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write one trajectory CSV per successful combination
    #[arg(long)]
    trajectories: bool,
    /// Output directory
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let t0 = Instant::now();

    let meta: MetaParameters = match &cli.meta {
        Some(path) => load_json(path)?,
        None => MetaParameters::default(),
    };
    let mut config: RunConfig = match &cli.config {
        Some(path) => load_json(path)?,
        None => RunConfig::default(),
    };
    if let Some(days) = cli.days {
        config.samples = SampleSpec::Regular { end: days, interval: 1.0 };
    }

    let spec = match cli.random {
        Some(n) => SweepSpec::log_uniform(n, (cli.size_min, cli.size_max), &cli.periods, cli.seed)?,
        None => SweepSpec::grid(&cli.sizes_i, &cli.sizes_j, &cli.periods),
    };

    let mut runner = SweepRunner::new(meta, config);
    if let Some(n) = cli.threads {
        runner = runner.threads(n);
    }

    let total = spec.len();
    let step = (total / 10).max(1);
    let progress = |done: usize, total: usize, _outcome: &SweepOutcome| {
        if done % step == 0 || done == total {
            log::info!("{done}/{total} combinations  mem {:.0} MB", mem_mb());
        }
    };
    let report = runner.run_with_progress(&spec, &progress)?;

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    let summary_path = cli.out.join("summary.csv");
    write_summary_csv(&summary_path, &report.summary_rows())?;

    if cli.trajectories {
        let dir = cli.out.join("trajectories");
        std::fs::create_dir_all(&dir)?;
        for (combo, out) in report.successes() {
            let name = format!("{}_{}_{}.csv", combo.size_i, combo.size_j, combo.period);
            write_trajectory_csv(&dir.join(name), &out.trajectory)?;
        }
    }

    for (combo, err) in report.failures() {
        eprintln!("  failed {combo}: {err}");
    }
    if let Some(partial) = report.partial_failure() {
        log::warn!("{partial}");
    }
    println!(
        "{total} combinations in {:.2} s ({} ok) → {}",
        t0.elapsed().as_secs_f64(),
        report.successes().count(),
        summary_path.display()
    );
    Ok(())
}
