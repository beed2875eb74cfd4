//! Mixed absolute/relative error control.

use pp_core::STATE_DIM;

use crate::StateVector;

/// Per-component error weights.
///
/// A local error estimate `e` is acceptable when, for every component,
/// `|e_i| ≤ absolute_i + relative · max(|y_i|, |y_new_i|)`.
///
/// Absolute tolerances are per component because the state mixes scales:
/// populations in cells L⁻¹ (≈10⁶) sit next to quotas in µmol N cell⁻¹
/// (≈10⁻⁸).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: [f64; STATE_DIM],
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::uniform(1e-6, 1e-9)
    }
}

impl Tolerance {
    pub fn new(relative: f64, absolute: [f64; STATE_DIM]) -> Self {
        Self { relative, absolute }
    }

    /// Same absolute tolerance for every component.
    pub fn uniform(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute: [absolute; STATE_DIM] }
    }

    /// Error weight for component `i` given its old and new values.
    #[inline]
    pub fn scale(&self, i: usize, old: f64, new: f64) -> f64 {
        self.absolute[i] + self.relative * old.abs().max(new.abs())
    }

    /// Weighted max-norm of an error estimate.  `≤ 1` means accept; any
    /// non-finite component yields `f64::INFINITY`.
    pub fn error_norm(&self, error: &StateVector, y: &StateVector, y_new: &StateVector) -> f64 {
        max_ratio((0..STATE_DIM).map(|i| error[i].abs() / self.scale(i, y[i], y_new[i])))
    }

    /// Weighted max-norm of `v` using `y` alone as the reference magnitude.
    pub fn weighted_norm(&self, v: &StateVector, y: &StateVector) -> f64 {
        max_ratio((0..STATE_DIM).map(|i| v[i].abs() / self.scale(i, y[i], y[i])))
    }

    /// `true` if every weight is positive and finite.
    pub fn is_valid(&self) -> bool {
        self.relative >= 0.0
            && self.relative.is_finite()
            && self.absolute.iter().all(|a| *a > 0.0 && a.is_finite())
    }
}

fn max_ratio(ratios: impl Iterator<Item = f64>) -> f64 {
    let mut worst = 0.0_f64;
    for r in ratios {
        if !r.is_finite() {
            return f64::INFINITY;
        }
        worst = worst.max(r);
    }
    worst
}
