//! `Radau5Integrator` — the stiff solver, backed by `russell_ode`.
//!
//! Every output interval `[times[k], times[k+1]]` is one `OdeSolver::solve`
//! call with `Method::Radau5` (fifth-order, L-stable Radau IIA), so the
//! solver lands exactly on each requested time.
//!
//! `russell_ode` takes a single absolute tolerance.  The state is therefore
//! integrated in units of the per-component absolute tolerance,
//! `z_i = y_i / absolute_i`, with `abs = 1`.  The acceptance test
//! `|e_z| ≤ 1 + rel·|z|` is then exactly `|e_y| ≤ absolute_i + rel·|y|`.

use std::sync::Mutex;

use pp_core::STATE_DIM;
use russell_lab::{StrError, Vector};
use russell_ode::{Method, OdeSolver, Params, System};
use russell_sparse::{CooMatrix, Sym};

use crate::integrator::check_time_sequence;
use crate::{
    Integrator, Jacobian, OdeSystem, Solution, SolverError, SolverResult, SolverStats, StateVector,
    Tolerance,
};

/// Returned from the callbacks when the model produces NaN or ±∞.
const NON_FINITE: StrError = "non-finite derivative";

/// Floor on the finite-difference increment, in scaled units.
const MIN_DELTA: f64 = 1e-12;

/// Configuration for the Radau5 solver.  Holds no per-run state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Radau5Integrator {
    /// Ceiling on step attempts (accepted + rejected) per `integrate` call.
    pub max_steps:    usize,
    /// First trial step of every output interval.  `None` keeps the
    /// `russell_ode` default.
    pub initial_step: Option<f64>,
}

impl Default for Radau5Integrator {
    fn default() -> Self {
        Self { max_steps: 100_000, initial_step: None }
    }
}

impl Radau5Integrator {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_initial_step(mut self, h: f64) -> Self {
        self.initial_step = Some(h);
        self
    }

    fn params(&self, tolerance: &Tolerance, budget: usize) -> Result<Params, StrError> {
        let mut params = Params::new(Method::Radau5);
        params.step.n_step_max = budget;
        if let Some(h) = self.initial_step {
            params.step.h_ini = h;
        }
        params.set_tolerances(1.0, tolerance.relative, None)?;
        Ok(params)
    }
}

// ── Scaled system ─────────────────────────────────────────────────────────────

/// `dz/dt = f(D·z) / D` with `D = diag(absolute)`.
struct Scaled<'a, S> {
    system: &'a S,
    scale:  StateVector,
}

impl<S: OdeSystem> Scaled<'_, S> {
    fn to_scaled(&self, y: &StateVector) -> [f64; STATE_DIM] {
        std::array::from_fn(|i| y[i] / self.scale[i])
    }

    fn to_state(&self, z: &Vector) -> StateVector {
        StateVector::from_fn(|i, _| z[i] * self.scale[i])
    }

    fn rate(&self, z: &StateVector) -> Result<StateVector, StrError> {
        let mut dydt = StateVector::zeros();
        self.system.derivatives(&z.component_mul(&self.scale), &mut dydt);
        let dzdt = dydt.component_div(&self.scale);
        if dzdt.iter().all(|v| v.is_finite()) { Ok(dzdt) } else { Err(NON_FINITE) }
    }

    /// Forward-difference Jacobian of [`rate`][Self::rate].
    fn jacobian(&self, z: &StateVector) -> Result<Jacobian, StrError> {
        let f0 = self.rate(z)?;
        let sqrt_eps = f64::EPSILON.sqrt();
        let mut jac = Jacobian::zeros();
        let mut z_pert = *z;
        for j in 0..STATE_DIM {
            let delta = (sqrt_eps * z[j].abs().max(1.0)).max(MIN_DELTA);
            z_pert[j] = z[j] + delta;
            let actual = z_pert[j] - z[j];
            jac.set_column(j, &((self.rate(&z_pert)? - f0) / actual));
            z_pert[j] = z[j];
        }
        Ok(jac)
    }
}

fn to_vector(z: &Vector) -> StateVector {
    StateVector::from_fn(|i, _| z[i])
}

/// Build a Radau5 solver over `scaled`.  Callback failures record the time
/// they happened at in `failed_at`.
fn build_solver<'a, S: OdeSystem>(
    scaled:    &'a Scaled<'a, S>,
    params:    Params,
    failed_at: &'a Mutex<f64>,
) -> Result<OdeSolver<'a, ()>, StrError> {
    let mut ode = System::new(STATE_DIM, move |f: &mut Vector, x: f64, z: &Vector, _: &mut ()| {
        let dzdt = scaled.rate(&to_vector(z)).inspect_err(|_| *failed_at.lock().unwrap() = x)?;
        for i in 0..STATE_DIM {
            f[i] = dzdt[i];
        }
        Ok(())
    });
    ode.set_jacobian(
        Some(STATE_DIM * STATE_DIM),
        Sym::No,
        move |jj: &mut CooMatrix, alpha: f64, x: f64, z: &Vector, _: &mut ()| {
            let jac = scaled.jacobian(&to_vector(z)).inspect_err(|_| *failed_at.lock().unwrap() = x)?;
            jj.reset();
            for i in 0..STATE_DIM {
                for j in 0..STATE_DIM {
                    jj.put(i, j, alpha * jac[(i, j)])?;
                }
            }
            Ok(())
        },
    )?;
    OdeSolver::new(params, ode)
}

/// Map a `russell_ode` failure that is neither a callback failure nor the
/// step ceiling.
fn classify(message: StrError, t: f64) -> SolverError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("small") {
        SolverError::StepSizeUnderflow { t }
    } else if lower.contains("singular") {
        SolverError::SingularMatrix { t }
    } else {
        SolverError::Backend { t, message }
    }
}

// ── Integrator ────────────────────────────────────────────────────────────────

impl Integrator for Radau5Integrator {
    fn integrate<S: OdeSystem>(
        &self,
        system:    &S,
        y0:        &StateVector,
        times:     &[f64],
        tolerance: &Tolerance,
    ) -> SolverResult<Solution> {
        check_time_sequence(times)?;
        if !tolerance.is_valid() {
            return Err(SolverError::InvalidTolerance);
        }
        if y0.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::NonFiniteInitialState);
        }

        let mut stats = SolverStats::default();
        let mut states = Vec::with_capacity(times.len());
        states.push(*y0);

        let scaled = Scaled { system, scale: StateVector::from(tolerance.absolute) };
        let mut z = Vector::from(&scaled.to_scaled(y0));
        let mut steps_used = 0_usize;

        for window in times.windows(2) {
            let (t0, t1) = (window[0], window[1]);
            let budget = self.max_steps.saturating_sub(steps_used);
            if budget == 0 {
                return Err(SolverError::StepLimitExceeded { t: t0, max_steps: self.max_steps });
            }

            let params = self.params(tolerance, budget).map_err(|_| SolverError::InvalidTolerance)?;
            let failed_at = Mutex::new(f64::NAN);
            let mut solver = build_solver(&scaled, params, &failed_at)
                .map_err(|message| SolverError::Backend { t: t0, message })?;
            let outcome = solver.solve(&mut z, t0, t1, None, &mut ());

            let work = solver.stats();
            stats += SolverStats {
                accepted_steps:    work.n_accepted,
                rejected_steps:    work.n_rejected,
                rhs_evaluations:   work.n_function,
                jacobian_updates:  work.n_jacobian,
                lu_decompositions: work.n_factor,
            };
            steps_used += work.n_steps;

            if let Err(message) = outcome {
                let failed_at = *failed_at.lock().unwrap();
                return Err(if !failed_at.is_nan() {
                    SolverError::NonFinite { t: failed_at }
                } else if steps_used >= self.max_steps {
                    SolverError::StepLimitExceeded { t: t0, max_steps: self.max_steps }
                } else {
                    classify(message, t0)
                });
            }

            let y = scaled.to_state(&z);
            if y.iter().any(|v| !v.is_finite()) {
                return Err(SolverError::NonFinite { t: t1 });
            }
            states.push(y);
        }

        Ok(Solution { states, stats })
    }
}
