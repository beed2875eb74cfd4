//! Physical and structural constants shared by every crate.

/// Boltzmann's constant in eV K⁻¹.
pub const BOLTZMANN_EV: f64 = 8.617_332_4e-5;

/// Reference temperature (20 °C) at which scaling-law coefficients are quoted.
pub const DEFAULT_REFERENCE_TEMPERATURE: f64 = 293.15;

/// Number of integrated state variables: `N_i, N_j, Q_i, Q_j, R`.
pub const STATE_DIM: usize = 5;
