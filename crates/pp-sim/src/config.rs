//! Per-run configuration.
//!
//! Everything a single run needs beyond the two cell sizes and the pulse
//! period, which vary across a sweep.  All fields have defaults so a partial
//! JSON document is enough:
//!
//! ```json
//! { "fraction_replaced": 0.5, "samples": { "regular": { "end": 120.0, "interval": 1.0 } } }
//! ```

use pp_core::{KineticParameters, SimulationState, STATE_DIM};
use pp_solver::{Radau5Integrator, Tolerance};
use serde::{Deserialize, Serialize};

use crate::{SampleSpec, SimError, SimResult};

/// Populations and nutrient at `t = 0`.  Quotas are not configurable: they
/// start at the midpoint of each strain's `[Qmin, Qmax]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// Cells L⁻¹.
    pub population_i: f64,
    /// Cells L⁻¹.
    pub population_j: f64,
    /// µmol N L⁻¹.
    pub nutrient:     f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self { population_i: 1.0e6, population_j: 1.0e6, nutrient: 10.0 }
    }
}

impl InitialConditions {
    /// The `t = 0` state with quotas seeded from `kinetics`.
    pub fn to_state(&self, kinetics: &[KineticParameters; 2]) -> SimulationState {
        SimulationState::new(0.0, self.population_i, self.population_j, 0.0, 0.0, self.nutrient)
            .with_midpoint_quotas(kinetics)
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, v) in [
            ("population_i", self.population_i),
            ("population_j", self.population_j),
            ("nutrient", self.nutrient),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SimError::Config(format!(
                    "initial {name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Error-control settings, expressed per state component.
///
/// The quota tolerance is relative to each strain's `Qmin` because quotas
/// span roughly 10⁻¹¹–10⁻⁵ µmol N cell⁻¹ across the size range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    pub relative:       f64,
    /// Cells L⁻¹.
    pub population:     f64,
    /// Multiplied by each strain's `Qmin`.
    pub quota_fraction: f64,
    /// µmol N L⁻¹.
    pub nutrient:       f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { relative: 1e-6, population: 1e-3, quota_fraction: 1e-6, nutrient: 1e-9 }
    }
}

impl ToleranceConfig {
    /// Solver tolerance for a run with the given kinetics.
    pub fn for_kinetics(&self, kinetics: &[KineticParameters; 2]) -> Tolerance {
        let mut absolute = [0.0; STATE_DIM];
        absolute[0] = self.population;
        absolute[1] = self.population;
        absolute[2] = self.quota_fraction * kinetics[0].qmin;
        absolute[3] = self.quota_fraction * kinetics[1].qmin;
        absolute[4] = self.nutrient;
        Tolerance::new(self.relative, absolute)
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, v) in [
            ("relative", self.relative),
            ("population", self.population),
            ("quota_fraction", self.quota_fraction),
            ("nutrient", self.nutrient),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimError::Config(format!(
                    "tolerance {name} must be positive and finite, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Shared configuration for one run or for every run of a sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Fraction of the culture replaced at each pulse, in `[0, 1]`.
    pub fraction_replaced:    f64,
    /// Nutrient concentration of the inflow medium, µmol N L⁻¹.
    pub inflow_concentration: f64,
    pub initial:              InitialConditions,
    pub samples:              SampleSpec,
    pub tolerance:            ToleranceConfig,
    /// Settings for the default solver, including the per-cycle step ceiling.
    pub solver:               Radau5Integrator,
    /// Relative slack before a quota outside `[Qmin, Qmax]` is reported.
    pub quota_slack:          f64,
    /// Ceiling on pulse cycles per run; a shorter period is a schedule error.
    pub max_cycles:           usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fraction_replaced:    0.3,
            inflow_concentration: 40.0,
            initial:              InitialConditions::default(),
            samples:              SampleSpec::default(),
            tolerance:            ToleranceConfig::default(),
            solver:               Radau5Integrator::default(),
            quota_slack:          1e-4,
            max_cycles:           100_000,
        }
    }
}

impl RunConfig {
    pub fn with_samples(mut self, samples: SampleSpec) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_max_steps_per_cycle(mut self, max_steps: usize) -> Self {
        self.solver.max_steps = max_steps;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}
