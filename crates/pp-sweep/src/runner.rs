//! `SweepRunner` — fans combinations out over a worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};

use pp_core::MetaParameters;
use pp_sim::{DriverBuilder, NoopObserver, RunConfig};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Combination, SweepOutcome, SweepReport, SweepResult, SweepSpec};

/// Per-combination completion callback.  Called from worker threads, in
/// completion order (not input order).
pub trait SweepProgress: Sync {
    fn on_combination_done(&self, done: usize, total: usize, outcome: &SweepOutcome);
}

impl<F> SweepProgress for F
where
    F: Fn(usize, usize, &SweepOutcome) + Sync,
{
    fn on_combination_done(&self, done: usize, total: usize, outcome: &SweepOutcome) {
        self(done, total, outcome)
    }
}

/// A [`SweepProgress`] that does nothing.
pub struct NoProgress;

impl SweepProgress for NoProgress {
    fn on_combination_done(&self, _done: usize, _total: usize, _outcome: &SweepOutcome) {}
}

/// One fewer than the available cores, at least 1.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Runs every combination of a [`SweepSpec`] with shared metaparameters and
/// run config.
///
/// ```rust,ignore
/// let report = SweepRunner::new(MetaParameters::default(), RunConfig::default())
///     .threads(4)
///     .run(&SweepSpec::grid(&[10.0, 100.0], &[1e3, 1e4], &[7.0, 14.0]))?;
/// for (combo, err) in report.failures() {
///     eprintln!("{combo}: {err}");
/// }
/// ```
pub struct SweepRunner {
    meta:    MetaParameters,
    config:  RunConfig,
    threads: Option<usize>,
}

impl SweepRunner {
    pub fn new(meta: MetaParameters, config: RunConfig) -> Self {
        Self { meta, config, threads: None }
    }

    /// Override the worker count.  Clamped to `1..=default_worker_count()`,
    /// so a sweep never takes every core.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n.clamp(1, default_worker_count()));
        self
    }

    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(default_worker_count)
    }

    pub fn run(&self, spec: &SweepSpec) -> SweepResult<SweepReport> {
        self.run_with_progress(spec, &NoProgress)
    }

    /// Run all combinations.  Individual failures land in the report; the
    /// only error returned here is a failure to build the worker pool.
    pub fn run_with_progress<P: SweepProgress>(
        &self,
        spec:     &SweepSpec,
        progress: &P,
    ) -> SweepResult<SweepReport> {
        let total = spec.len();
        let done = AtomicUsize::new(0);
        let task = |(index, combination): (usize, &Combination)| {
            let outcome = run_one(index, *combination, self.meta.clone(), &self.config);
            if let Err(e) = &outcome.result {
                log::warn!("combination {index} {combination} failed: {e}");
            }
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.on_combination_done(n, total, &outcome);
            outcome
        };

        log::info!("sweep: {total} combinations on {} worker(s)", self.worker_count());

        #[cfg(feature = "parallel")]
        let outcomes: Vec<SweepOutcome> = {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.worker_count())
                .build()
                .map_err(|e| crate::SweepError::ThreadPool(e.to_string()))?;
            pool.install(|| spec.combinations().par_iter().enumerate().map(task).collect())
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<SweepOutcome> =
            spec.combinations().iter().enumerate().map(task).collect();

        let report = SweepReport::new(outcomes);
        log::info!(
            "sweep finished: {} succeeded, {} failed",
            report.len() - report.failure_count(),
            report.failure_count()
        );
        Ok(report)
    }
}

/// Build and run one driver.  `meta` arrives by value so each task owns its
/// copy.
fn run_one(
    index:       usize,
    combination: Combination,
    meta:        MetaParameters,
    config:      &RunConfig,
) -> SweepOutcome {
    let result = DriverBuilder::new(meta, combination.sizes(), combination.period, config.clone())
        .build()
        .and_then(|driver| driver.run(&mut NoopObserver));
    SweepOutcome { index, combination, result }
}
