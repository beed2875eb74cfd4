//! Core error types.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so a mapper failure propagates with `?` all the way
//! up to the sweep report.

use thiserror::Error;

/// Which kinetic-parameter invariant a size/temperature combination broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KineticsViolation {
    #[error("cell size must be positive")]
    NonPositiveSize,

    #[error("temperature must be positive (Kelvin)")]
    NonPositiveTemperature,

    #[error("{0} is not finite")]
    NonFinite(&'static str),

    #[error("Qmin must be positive")]
    NonPositiveQmin,

    #[error("Qmax must exceed Qmin")]
    QuotaOrdering,

    #[error("Vmax must be positive")]
    NonPositiveVmax,

    #[error("mu_inf denominator Vmax·(Qmax−Qmin) − mu_max·Qmin·(Qmax−Qmin) is not positive")]
    GrowthDenominator,

    #[error("half-saturation constant must be positive")]
    NonPositiveHalfSaturation,

    #[error("{0} must not be negative")]
    NegativeRate(&'static str),
}

/// The top-level error type for `pp-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid kinetic parameters for size {size} at {temperature} K: {violation}")]
    InvalidKinetics {
        size:        f64,
        temperature: f64,
        violation:   KineticsViolation,
    },

    #[error("invalid metaparameters: {0}")]
    InvalidMeta(String),
}

/// Shorthand result type for `pp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
