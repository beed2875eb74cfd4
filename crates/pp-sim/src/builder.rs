//! Fluent builder for constructing a [`Driver`].

use pp_core::{KineticParameters, MetaParameters, Strain};
use pp_model::{DroopCompetition, Pulse};
use pp_solver::{Integrator, Radau5Integrator};

use crate::{
    Driver, InitialConditions, PulseSchedule, RunConfig, SampleTimes, ScheduleError, SimError, SimResult,
};

/// Fluent builder for [`Driver<I>`].
///
/// # Required inputs
///
/// - [`MetaParameters`] — allometric laws and temperatures
/// - `sizes` — cell volumes of strains i and j, µm³
/// - `period` — days between pulses
/// - [`RunConfig`] — pulse strength, initial conditions, samples, tolerances
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                  |
/// |--------------------|------------------------------------------|
/// | `.samples(s)`      | `config.samples.resolve()`               |
/// | `.initial(c)`      | `config.initial`                         |
/// | `.integrator(j)`   | `config.solver` (a [`Radau5Integrator`]) |
///
/// Every input is validated in [`build`][Self::build]; a `Driver` that exists
/// has a valid schedule and valid kinetics.
pub struct DriverBuilder<I: Integrator = Radau5Integrator> {
    meta:       MetaParameters,
    sizes:      [f64; 2],
    period:     f64,
    config:     RunConfig,
    samples:    Option<SampleTimes>,
    initial:    Option<InitialConditions>,
    integrator: I,
}

impl DriverBuilder<Radau5Integrator> {
    pub fn new(meta: MetaParameters, sizes: [f64; 2], period: f64, config: RunConfig) -> Self {
        let integrator = config.solver.clone();
        Self { meta, sizes, period, config, samples: None, initial: None, integrator }
    }
}

impl<I: Integrator> DriverBuilder<I> {
    /// Override the sample times from the config.
    pub fn samples(mut self, samples: SampleTimes) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Override the initial populations and nutrient from the config.
    pub fn initial(mut self, initial: InitialConditions) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Replace the integrator.
    pub fn integrator<J: Integrator>(self, integrator: J) -> DriverBuilder<J> {
        DriverBuilder {
            meta:       self.meta,
            sizes:      self.sizes,
            period:     self.period,
            config:     self.config,
            samples:    self.samples,
            initial:    self.initial,
            integrator,
        }
    }

    /// Validate all inputs and map sizes to kinetics.
    ///
    /// Schedule problems are checked first, so a bad period or sample list is
    /// reported even when the kinetics would also be invalid.
    pub fn build(self) -> SimResult<Driver<I>> {
        let schedule = PulseSchedule::new(self.period)?;
        let samples = match self.samples {
            Some(s) => s,
            None => self.config.samples.resolve()?,
        };
        let end = samples.end_time();
        if schedule.cycle_count(end) > self.config.max_cycles {
            return Err(ScheduleError::TooManyCycles {
                period: self.period,
                end,
                max:    self.config.max_cycles,
            }
            .into());
        }

        self.config.tolerance.validate()?;
        if !self.config.quota_slack.is_finite() || self.config.quota_slack < 0.0 {
            return Err(SimError::Config(format!(
                "quota_slack must be finite and non-negative, got {}",
                self.config.quota_slack
            )));
        }
        let initial = self.initial.unwrap_or(self.config.initial);
        initial.validate()?;
        let pulse = Pulse::new(self.config.fraction_replaced, self.config.inflow_concentration)?;

        self.meta.validate()?;
        let map = |strain: Strain| {
            KineticParameters::from_size(self.sizes[strain.index()], &self.meta)
                .map_err(|source| SimError::Kinetics { strain, source })
        };
        let kinetics = [map(Strain::I)?, map(Strain::J)?];
        log::debug!(
            "kinetics: i (size {}) mu_inf = {:.4}, j (size {}) mu_inf = {:.4}",
            self.sizes[0],
            kinetics[0].mu_inf,
            self.sizes[1],
            kinetics[1].mu_inf
        );

        Ok(Driver {
            sizes:       self.sizes,
            kinetics,
            model:       DroopCompetition::new(kinetics),
            initial:     initial.to_state(&kinetics),
            tolerance:   self.config.tolerance.for_kinetics(&kinetics),
            quota_slack: self.config.quota_slack,
            pulse,
            schedule,
            samples,
            integrator:  self.integrator,
        })
    }
}
