//! `pp-solver` — the integrator boundary of the `plankton_pulse` model.
//!
//! The driver never talks to a concrete solver.  It holds some
//! `I: Integrator` and hands it an [`OdeSystem`], an initial state vector and
//! an ordered list of output times; the integrator returns the state sampled
//! at exactly those times or a [`SolverError`].
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`system`]      | `OdeSystem` trait, `StateVector`/`Jacobian` aliases        |
//! | [`integrator`]  | `Integrator` trait, `Solution`                             |
//! | [`radau5`]      | `Radau5Integrator` — stiff solver over `russell_ode`       |
//! | [`tolerance`]   | `Tolerance` — mixed absolute/relative error control        |
//! | [`stats`]       | `SolverStats` — step and evaluation counters               |
//! | [`error`]       | `SolverError`, `SolverResult<T>`                           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pp_solver::{Integrator, Radau5Integrator, Tolerance};
//!
//! let solution = Radau5Integrator::default()
//!     .integrate(&system, &y0, &[0.0, 7.0, 14.0], &Tolerance::default())?;
//! assert_eq!(solution.states.len(), 3);
//! ```

pub mod error;
pub mod integrator;
pub mod radau5;
pub mod stats;
pub mod system;
pub mod tolerance;

#[cfg(test)]
mod tests;

pub use error::{SolverError, SolverResult};
pub use integrator::{Integrator, Solution};
pub use radau5::Radau5Integrator;
pub use stats::SolverStats;
pub use system::{Jacobian, OdeSystem, StateVector};
pub use tolerance::Tolerance;
