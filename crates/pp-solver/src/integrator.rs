//! The `Integrator` trait — the replaceable solver strategy.

use crate::{OdeSystem, SolverError, SolverResult, SolverStats, StateVector, Tolerance};

/// States sampled at the requested times plus the work it took.
#[derive(Clone, Debug)]
pub struct Solution {
    /// `states[k]` is the state at `times[k]`; `states[0]` is the initial
    /// state, untouched.
    pub states: Vec<StateVector>,
    pub stats:  SolverStats,
}

/// Pluggable adaptive integrator.
///
/// Any implementation must:
///
/// - treat `times[0]` as the time of `y0` and return exactly one state per
///   entry of `times`;
/// - reject empty, non-finite or non-increasing `times` with
///   [`SolverError::BadTimeSequence`];
/// - report non-convergence, step underflow and step-limit exhaustion as a
///   [`SolverError`] instead of returning a truncated solution.
///
/// Implementations hold only configuration, so one value can be shared by
/// every worker of a sweep (`Send + Sync`).
pub trait Integrator: Send + Sync {
    fn integrate<S: OdeSystem>(
        &self,
        system:    &S,
        y0:        &StateVector,
        times:     &[f64],
        tolerance: &Tolerance,
    ) -> SolverResult<Solution>;
}

/// Shared validation for `times`: non-empty, finite, strictly increasing.
pub fn check_time_sequence(times: &[f64]) -> SolverResult<()> {
    if times.is_empty() {
        return Err(SolverError::BadTimeSequence("empty".into()));
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(SolverError::BadTimeSequence(format!("non-finite time {t}")));
    }
    if let Some(w) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(SolverError::BadTimeSequence(format!(
            "times not strictly increasing ({} then {})",
            w[0], w[1]
        )));
    }
    Ok(())
}
