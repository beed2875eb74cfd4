//! Bridge between the domain state and the generic solver interface.

use pp_core::SimulationState;
use pp_model::DroopCompetition;
use pp_solver::{Integrator, SolverError, SolverResult, SolverStats, StateVector, Tolerance};

/// Integrate `model` from `start` through `times` and return one
/// [`SimulationState`] per requested time.
///
/// `times[0]` must equal `start.t`; the first returned state is `start`
/// itself.
pub fn integrate_cycle<I: Integrator>(
    integrator: &I,
    model:      &DroopCompetition,
    start:      &SimulationState,
    times:      &[f64],
    tolerance:  &Tolerance,
) -> SolverResult<(Vec<SimulationState>, SolverStats)> {
    match times.first() {
        Some(&t0) if t0 == start.t => {}
        Some(&t0) => {
            return Err(SolverError::BadTimeSequence(format!(
                "first output time {t0} does not match the initial state time {}",
                start.t
            )));
        }
        None => return Err(SolverError::BadTimeSequence("no output times".into())),
    }

    let y0 = StateVector::from(start.to_array());
    let solution = integrator.integrate(model, &y0, times, tolerance)?;
    if solution.states.len() != times.len() {
        return Err(SolverError::BadTimeSequence(format!(
            "integrator returned {} states for {} output times",
            solution.states.len(),
            times.len()
        )));
    }

    let states = times
        .iter()
        .zip(&solution.states)
        .map(|(&t, y)| SimulationState::from_array(t, std::array::from_fn(|k| y[k])))
        .collect();
    Ok((states, solution.stats))
}
