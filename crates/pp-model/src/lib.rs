//! `pp-model` — the two pure operators of the competition model.
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`rhs`]    | Droop growth, quota-limited Monod uptake, `DroopCompetition`    |
//! | [`pulse`]  | `Pulse` — instantaneous dilution/mixing with a fresh source     |
//! | [`error`]  | `ModelError`, `ModelResult<T>`                                  |
//!
//! # Governing equations
//!
//! For each strain `s ∈ {i, j}`:
//!
//! ```text
//! mu_s(Q)  = mu_inf · (1 − Qmin / Q)
//! V_s(R,Q) = Vmax · R / (H_up + R) · (Qmax − Q) / (Qmax − Qmin)
//!
//! dN_s/dt = N_s · (mu_s − m)
//! dQ_s/dt = V_s − mu_s · Q_s
//! dR/dt   = −Σ V_s · N_s
//! ```
//!
//! Both operators are pure and allocation-free; neither holds mutable state.

pub mod error;
pub mod pulse;
pub mod rhs;


pub use error::{ModelError, ModelResult};
pub use pulse::Pulse;
pub use rhs::{Derivatives, DroopCompetition, derivatives, droop_growth, uptake_rate};
