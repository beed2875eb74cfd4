//! Per-call work counters.

use std::ops::AddAssign;

/// Counters reported alongside every [`Solution`][crate::Solution].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverStats {
    pub accepted_steps:    usize,
    pub rejected_steps:    usize,
    pub rhs_evaluations:   usize,
    pub jacobian_updates:  usize,
    pub lu_decompositions: usize,
}

impl SolverStats {
    /// Accepted plus rejected step attempts.
    #[inline]
    pub fn steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

impl AddAssign for SolverStats {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted_steps    += rhs.accepted_steps;
        self.rejected_steps    += rhs.rejected_steps;
        self.rhs_evaluations   += rhs.rhs_evaluations;
        self.jacobian_updates  += rhs.jacobian_updates;
        self.lu_decompositions += rhs.lu_decompositions;
    }
}
