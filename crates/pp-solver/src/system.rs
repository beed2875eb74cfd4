//! The right-hand-side seam between model and solver.

use nalgebra::{SMatrix, SVector};
use pp_core::STATE_DIM;

/// Integrated components `[N_i, N_j, Q_i, Q_j, R]` as a stack vector.
pub type StateVector = SVector<f64, STATE_DIM>;

/// Dense `STATE_DIM × STATE_DIM` matrix; the finite-difference Jacobian.
pub type Jacobian = SMatrix<f64, STATE_DIM, STATE_DIM>;

/// An autonomous system `dy/dt = f(y)`.
///
/// Called many times per output interval from inside the integrator's
/// stepping loop, so implementations must write into `dydt` without
/// allocating.  `Sync` lets one system be shared read-only if an integrator
/// chooses to parallelise Jacobian columns.
pub trait OdeSystem: Sync {
    fn derivatives(&self, y: &StateVector, dydt: &mut StateVector);
}

