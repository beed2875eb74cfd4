//! `Driver` — the hybrid integrate/pulse cycle loop.

use pp_core::{KineticParameters, SimulationState, Strain, Trajectory};
use pp_model::{DroopCompetition, Pulse};
use pp_solver::{Integrator, Radau5Integrator, SolverStats, Tolerance};

use crate::{
    DriverObserver, Excursion, ExcursionKind, PulseSchedule, SampleTimes, SimError, SimResult,
    integrate_cycle,
};

/// Where the cycle loop is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// About to integrate cycle `cycle`.
    Integrating { cycle: usize },
    /// Cycle `cycle` has ended on a pulse boundary short of the horizon.
    AtPulseBoundary { cycle: usize },
    Terminated,
}

/// Everything a finished run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput {
    /// One state per requested sample time, strictly increasing in `t`.
    pub trajectory:     Trajectory,
    pub sizes:          [f64; 2],
    pub kinetics:       [KineticParameters; 2],
    /// Solver work summed over all cycles.
    pub stats:          SolverStats,
    pub cycles:         usize,
    pub pulses_applied: usize,
    pub excursions:     usize,
}

/// A validated, ready-to-run simulation.  Built by
/// [`DriverBuilder`][crate::DriverBuilder].
///
/// `run` takes `&self`: all evolving state is local to the call, so a
/// driver can be run repeatedly and yields identical output each time.
pub struct Driver<I: Integrator = Radau5Integrator> {
    pub(crate) sizes:       [f64; 2],
    pub(crate) kinetics:    [KineticParameters; 2],
    pub(crate) model:       DroopCompetition,
    pub(crate) initial:     SimulationState,
    pub(crate) tolerance:   Tolerance,
    pub(crate) quota_slack: f64,
    pub(crate) pulse:       Pulse,
    pub(crate) schedule:    PulseSchedule,
    pub(crate) samples:     SampleTimes,
    pub(crate) integrator:  I,
}

impl<I: Integrator> Driver<I> {
    pub fn kinetics(&self) -> &[KineticParameters; 2] {
        &self.kinetics
    }

    /// The `t = 0` state, quotas already at their midpoints.
    pub fn initial_state(&self) -> &SimulationState {
        &self.initial
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    pub fn schedule(&self) -> &PulseSchedule {
        &self.schedule
    }

    pub fn samples(&self) -> &SampleTimes {
        &self.samples
    }

    pub fn end_time(&self) -> f64 {
        self.samples.end_time()
    }

    /// Run to the horizon.
    ///
    /// Each cycle's solver output is appended as-is, so a pulse boundary is
    /// first recorded as the pre-pulse state; the pulse then overwrites that
    /// last point.  The next cycle starts from the same instant and appends
    /// it again, and the final dedup keeps the later copy.  Boundary instants
    /// that were not requested as samples are dropped at the end.
    ///
    /// # Errors
    ///
    /// [`SimError::Integration`] if the solver fails in any cycle.  Partial
    /// output is discarded.
    pub fn run<O: DriverObserver>(&self, observer: &mut O) -> SimResult<RunOutput> {
        let end = self.samples.end_time();
        let mut trajectory = Trajectory::with_capacity(self.samples.len() + 2);
        let mut stats = SolverStats::default();
        let mut current = self.initial;
        let (mut cycles, mut pulses, mut excursions) = (0, 0, 0);

        let mut phase = Phase::Integrating { cycle: 0 };
        loop {
            observer.on_phase(phase);
            phase = match phase {
                Phase::Integrating { cycle } => {
                    let start = current.t;
                    let stop = self.schedule.cycle_stop(cycle, end);
                    let times = self.samples.cycle_times(start, stop);
                    observer.on_cycle_start(cycle, start, stop);

                    let (states, cycle_stats) = integrate_cycle(
                        &self.integrator,
                        &self.model,
                        &current,
                        &times,
                        &self.tolerance,
                    )
                    .map_err(|source| SimError::Integration { cycle, start, source })?;

                    excursions += self.check_excursions(&states, observer);
                    stats += cycle_stats;
                    cycles += 1;
                    observer.on_cycle_end(cycle, &cycle_stats);

                    if let Some(last) = states.last() {
                        current = *last;
                    }
                    trajectory.extend(states);

                    if stop >= end {
                        Phase::Terminated
                    } else {
                        Phase::AtPulseBoundary { cycle }
                    }
                }
                Phase::AtPulseBoundary { cycle } => {
                    let post = self.pulse.apply(&current);
                    if let Some(last) = trajectory.last_mut() {
                        *last = post;
                    }
                    observer.on_pulse(current.t, &current, &post);
                    current = post;
                    pulses += 1;
                    Phase::Integrating { cycle: cycle + 1 }
                }
                Phase::Terminated => break,
            };
        }

        trajectory.dedup_keep_last();
        trajectory.retain(|s| self.samples.contains(s.t));
        debug_assert!(trajectory.is_strictly_increasing());

        let output = RunOutput {
            trajectory,
            sizes: self.sizes,
            kinetics: self.kinetics,
            stats,
            cycles,
            pulses_applied: pulses,
            excursions,
        };
        observer.on_run_end(&output);
        Ok(output)
    }

    /// Report soft-invariant violations in one cycle's output.  Negative
    /// values within the absolute tolerance are solver noise and ignored.
    fn check_excursions<O: DriverObserver>(
        &self,
        states:   &[SimulationState],
        observer: &mut O,
    ) -> usize {
        let abs = &self.tolerance.absolute;
        let mut found = 0;
        let mut emit = |excursion: Excursion| {
            observer.on_excursion(&excursion);
            found += 1;
        };

        for s in states {
            for strain in Strain::BOTH {
                let k = &self.kinetics[strain.index()];
                let n = s.population(strain);
                if n < -abs[strain.index()] {
                    emit(Excursion { t: s.t, kind: ExcursionKind::NegativePopulation { strain, value: n } });
                }
                let q = s.quota(strain);
                if q < k.qmin * (1.0 - self.quota_slack) || q > k.qmax * (1.0 + self.quota_slack) {
                    emit(Excursion {
                        t:    s.t,
                        kind: ExcursionKind::QuotaOutOfRange { strain, value: q, qmin: k.qmin, qmax: k.qmax },
                    });
                }
            }
            if s.r < -abs[4] {
                emit(Excursion { t: s.t, kind: ExcursionKind::NegativeNutrient { value: s.r } });
            }
        }
        found
    }
}
