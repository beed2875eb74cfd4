//! `pp-core` — foundational types for the `plankton_pulse` competition model.
//!
//! This crate is a dependency of every other `pp-*` crate.  It has no `pp-*`
//! dependencies and one external one (`thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                                |
//! |------------------|---------------------------------------------------------|
//! | [`constants`]    | Boltzmann constant, state dimension, reference temps    |
//! | [`meta`]         | `ScalingLaw`, `MetaParameters`                          |
//! | [`kinetics`]     | `KineticParameters`, the size/temperature mapper        |
//! | [`state`]        | `SimulationState`, `Strain`, `Field`                    |
//! | [`trajectory`]   | `Trajectory` — time-ordered run output                  |
//! | [`error`]        | `CoreError`, `KineticsViolation`, `CoreResult`          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod constants;
pub mod error;
pub mod kinetics;
pub mod meta;
pub mod state;
pub mod trajectory;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use constants::{BOLTZMANN_EV, STATE_DIM};
pub use error::{CoreError, CoreResult, KineticsViolation};
pub use kinetics::{KineticParameters, arrhenius};
pub use meta::{MetaParameters, ScalingLaw};
pub use state::{Field, SimulationState, Strain};
pub use trajectory::Trajectory;
