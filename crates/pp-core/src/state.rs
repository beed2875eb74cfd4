//! Simulation state vector and field/strain labels.

use std::fmt;

use crate::{KineticParameters, STATE_DIM};

// ── Strain ────────────────────────────────────────────────────────────────────

/// One of the two competing strains.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strain {
    I,
    J,
}

impl Strain {
    pub const BOTH: [Strain; 2] = [Strain::I, Strain::J];

    /// Position in `[KineticParameters; 2]`-style arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Strain::I => 0,
            Strain::J => 1,
        }
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strain::I => f.write_str("i"),
            Strain::J => f.write_str("j"),
        }
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// Column labels for tabular export, in output order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Field {
    Time,
    PopulationI,
    PopulationJ,
    QuotaI,
    QuotaJ,
    Nutrient,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Time,
        Field::PopulationI,
        Field::PopulationJ,
        Field::QuotaI,
        Field::QuotaJ,
        Field::Nutrient,
    ];

    /// Header name used in delimited exports.
    pub fn name(self) -> &'static str {
        match self {
            Field::Time        => "time",
            Field::PopulationI => "N_i",
            Field::PopulationJ => "N_j",
            Field::QuotaI      => "Q_i",
            Field::QuotaJ      => "Q_j",
            Field::Nutrient    => "R",
        }
    }
}

// ── SimulationState ───────────────────────────────────────────────────────────

/// `{t, N_i, N_j, Q_i, Q_j, R}` at one instant.
///
/// `Q` should stay within `[Qmin, Qmax]` and `N`, `R` non-negative, but these
/// are monitored by the driver rather than enforced here.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationState {
    pub t:   f64,
    pub n_i: f64,
    pub n_j: f64,
    pub q_i: f64,
    pub q_j: f64,
    pub r:   f64,
}

impl SimulationState {
    pub fn new(t: f64, n_i: f64, n_j: f64, q_i: f64, q_j: f64, r: f64) -> Self {
        Self { t, n_i, n_j, q_i, q_j, r }
    }

    /// The integrated components `[N_i, N_j, Q_i, Q_j, R]`.
    #[inline]
    pub fn to_array(&self) -> [f64; STATE_DIM] {
        [self.n_i, self.n_j, self.q_i, self.q_j, self.r]
    }

    /// Rebuild a state at time `t` from integrated components.
    #[inline]
    pub fn from_array(t: f64, y: [f64; STATE_DIM]) -> Self {
        let [n_i, n_j, q_i, q_j, r] = y;
        Self { t, n_i, n_j, q_i, q_j, r }
    }

    #[inline]
    pub fn population(&self, strain: Strain) -> f64 {
        match strain {
            Strain::I => self.n_i,
            Strain::J => self.n_j,
        }
    }

    #[inline]
    pub fn quota(&self, strain: Strain) -> f64 {
        match strain {
            Strain::I => self.q_i,
            Strain::J => self.q_j,
        }
    }

    /// Value of one export column.
    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::Time        => self.t,
            Field::PopulationI => self.n_i,
            Field::PopulationJ => self.n_j,
            Field::QuotaI      => self.q_i,
            Field::QuotaJ      => self.q_j,
            Field::Nutrient    => self.r,
        }
    }

    /// Replace both quotas with the midpoint of each strain's `[Qmin, Qmax]`.
    pub fn with_midpoint_quotas(self, kinetics: &[KineticParameters; 2]) -> Self {
        Self {
            q_i: kinetics[0].quota_midpoint(),
            q_j: kinetics[1].quota_midpoint(),
            ..self
        }
    }

    /// Total nutrient in the system: `R + Q_i·N_i + Q_j·N_j`.
    #[inline]
    pub fn total_nutrient(&self) -> f64 {
        self.r + self.q_i * self.n_i + self.q_j * self.n_j
    }

    /// `true` if every field is finite.
    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.to_array().iter().all(|v| v.is_finite())
    }
}
