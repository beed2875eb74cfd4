//! Driver observer trait for progress reporting and diagnostics.

use pp_core::{SimulationState, Strain};
use pp_solver::SolverStats;

use crate::{Phase, RunOutput};

/// What left its expected range.  The value is the offending state component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExcursionKind {
    NegativePopulation { strain: Strain, value: f64 },
    NegativeNutrient { value: f64 },
    QuotaOutOfRange { strain: Strain, value: f64, qmin: f64, qmax: f64 },
}

/// A soft-invariant violation seen in solver output.  These are reported,
/// never raised as errors: small undershoots are expected near extinction
/// or nutrient exhaustion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Excursion {
    pub t:    f64,
    pub kind: ExcursionKind,
}

impl std::fmt::Display for Excursion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ExcursionKind::NegativePopulation { strain, value } => {
                write!(f, "t = {}: N_{strain} = {value:e} < 0", self.t)
            }
            ExcursionKind::NegativeNutrient { value } => {
                write!(f, "t = {}: R = {value:e} < 0", self.t)
            }
            ExcursionKind::QuotaOutOfRange { strain, value, qmin, qmax } => write!(
                f,
                "t = {}: Q_{strain} = {value:e} outside [{qmin:e}, {qmax:e}]",
                self.t
            ),
        }
    }
}

/// Callbacks invoked by [`Driver::run`][crate::Driver::run] at key points in
/// the cycle loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — pulse recorder
///
/// ```rust,ignore
/// struct PulseLog(Vec<(f64, SimulationState, SimulationState)>);
///
/// impl DriverObserver for PulseLog {
///     fn on_pulse(&mut self, t: f64, pre: &SimulationState, post: &SimulationState) {
///         self.0.push((t, *pre, *post));
///     }
/// }
/// ```
pub trait DriverObserver {
    /// Called on entry to every phase of the cycle loop, `Terminated`
    /// included.
    fn on_phase(&mut self, _phase: Phase) {}

    /// Called before integrating cycle `cycle` over `[start, stop]`.
    fn on_cycle_start(&mut self, _cycle: usize, _start: f64, _stop: f64) {}

    /// Called after cycle `cycle` integrated successfully.
    fn on_cycle_end(&mut self, _cycle: usize, _stats: &SolverStats) {}

    /// Called when the pulse operator replaces the state at time `t`.
    fn on_pulse(&mut self, _t: f64, _pre: &SimulationState, _post: &SimulationState) {}

    fn on_excursion(&mut self, _excursion: &Excursion) {}

    /// Called once with the finished output.
    fn on_run_end(&mut self, _output: &RunOutput) {}
}

/// A [`DriverObserver`] that does nothing.
pub struct NoopObserver;

impl DriverObserver for NoopObserver {}

/// Forwards driver events to the `log` facade under a run label.
///
/// Phases go out at `trace`, cycles and pulses at `debug`, excursions at
/// `warn`, the run summary at `info`.
pub struct LogObserver {
    label: String,
}

impl LogObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl DriverObserver for LogObserver {
    fn on_phase(&mut self, phase: Phase) {
        log::trace!("[{}] {phase:?}", self.label);
    }

    fn on_cycle_start(&mut self, cycle: usize, start: f64, stop: f64) {
        log::debug!("[{}] cycle {cycle}: integrating {start} → {stop}", self.label);
    }

    fn on_cycle_end(&mut self, cycle: usize, stats: &SolverStats) {
        log::debug!(
            "[{}] cycle {cycle}: {} accepted / {} rejected steps",
            self.label,
            stats.accepted_steps,
            stats.rejected_steps
        );
    }

    fn on_pulse(&mut self, t: f64, pre: &SimulationState, post: &SimulationState) {
        log::debug!("[{}] pulse at t = {t}: R {:.4} → {:.4}", self.label, pre.r, post.r);
    }

    fn on_excursion(&mut self, excursion: &Excursion) {
        log::warn!("[{}] {excursion}", self.label);
    }

    fn on_run_end(&mut self, output: &RunOutput) {
        match output.trajectory.final_state() {
            Some(last) => log::info!(
                "[{}] done: {} samples, {} pulses, {} steps; final N_i = {:.4e}, N_j = {:.4e}",
                self.label,
                output.trajectory.len(),
                output.pulses_applied,
                output.stats.steps(),
                last.n_i,
                last.n_j
            ),
            None => log::info!("[{}] done: empty trajectory", self.label),
        }
    }
}
