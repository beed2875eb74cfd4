//! Right-hand side of the competition model.
//!
//! Every function here assumes the [`KineticParameters`] invariants hold
//! (`Qmax > Qmin > 0`) and that `Q > 0`.  Both are guaranteed by the mapper
//! and by quota initialisation at the midpoint of `[Qmin, Qmax]`; the Droop
//! term diverges as `Q → 0`, and the integrator rejects any step that
//! produces a non-finite derivative.

use pp_core::{KineticParameters, SimulationState};
use pp_solver::{OdeSystem, StateVector};

/// Droop growth rate `mu_inf · (1 − Qmin/Q)`.
#[inline]
pub fn droop_growth(quota: f64, k: &KineticParameters) -> f64 {
    k.mu_inf * (1.0 - k.qmin / quota)
}

/// Per-cell uptake: Monod in `R`, throttled linearly as `Q` approaches
/// `Qmax`.
#[inline]
pub fn uptake_rate(nutrient: f64, quota: f64, k: &KineticParameters) -> f64 {
    k.vmax * nutrient / (k.half_saturation + nutrient) * (k.qmax - quota) / k.quota_span()
}

/// `{dN_i, dN_j, dQ_i, dQ_j, dR}` at one state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivatives {
    pub dn_i: f64,
    pub dn_j: f64,
    pub dq_i: f64,
    pub dq_j: f64,
    pub dr:   f64,
}

/// Per-strain contribution: `(dN, dQ, nutrient drawn from the medium)`.
#[inline]
fn strain_terms(population: f64, quota: f64, nutrient: f64, k: &KineticParameters) -> (f64, f64, f64) {
    let mu = droop_growth(quota, k);
    let v = uptake_rate(nutrient, quota, k);
    (population * (mu - k.mortality), v - mu * quota, v * population)
}

/// Evaluate the model at `state` with kinetics `[strain i, strain j]`.
pub fn derivatives(state: &SimulationState, kinetics: &[KineticParameters; 2]) -> Derivatives {
    let (dn_i, dq_i, draw_i) = strain_terms(state.n_i, state.q_i, state.r, &kinetics[0]);
    let (dn_j, dq_j, draw_j) = strain_terms(state.n_j, state.q_j, state.r, &kinetics[1]);
    Derivatives { dn_i, dn_j, dq_i, dq_j, dr: -(draw_i + draw_j) }
}

/// The model bound to two strains' kinetics, in the shape the integrator
/// consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DroopCompetition {
    kinetics: [KineticParameters; 2],
}

impl DroopCompetition {
    pub fn new(kinetics: [KineticParameters; 2]) -> Self {
        Self { kinetics }
    }

    pub fn kinetics(&self) -> &[KineticParameters; 2] {
        &self.kinetics
    }
}

impl OdeSystem for DroopCompetition {
    #[inline]
    fn derivatives(&self, y: &StateVector, dydt: &mut StateVector) {
        let [k_i, k_j] = &self.kinetics;
        let (n_i, n_j, q_i, q_j, r) = (y[0], y[1], y[2], y[3], y[4]);

        let (dn_i, dq_i, draw_i) = strain_terms(n_i, q_i, r, k_i);
        let (dn_j, dq_j, draw_j) = strain_terms(n_j, q_j, r, k_j);

        dydt[0] = dn_i;
        dydt[1] = dn_j;
        dydt[2] = dq_i;
        dydt[3] = dq_j;
        dydt[4] = -(draw_i + draw_j);
    }
}
