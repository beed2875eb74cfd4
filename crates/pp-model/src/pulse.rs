//! The pulse (mixing) operator.
//!
//! A pulse replaces `fraction_replaced` of the culture with medium at
//! concentration `R_in`:
//!
//! ```text
//! N ← (1 − f) · N               (cells are diluted, not added)
//! R ← (1 − f) · R + f · R_in    (instantaneous mixing)
//! Q, t unchanged                (quota is per cell; the event has no duration)
//! ```

use pp_core::SimulationState;

use crate::{ModelError, ModelResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    fraction_replaced:    f64,
    inflow_concentration: f64,
}

impl Pulse {
    /// Validate `fraction_replaced ∈ [0, 1]` and finite `R_in ≥ 0`.
    pub fn new(fraction_replaced: f64, inflow_concentration: f64) -> ModelResult<Self> {
        if !(0.0..=1.0).contains(&fraction_replaced) {
            return Err(ModelError::InvalidFraction(fraction_replaced));
        }
        if !inflow_concentration.is_finite() || inflow_concentration < 0.0 {
            return Err(ModelError::InvalidInflow(inflow_concentration));
        }
        Ok(Self { fraction_replaced, inflow_concentration })
    }

    #[inline]
    pub fn fraction_replaced(&self) -> f64 {
        self.fraction_replaced
    }

    #[inline]
    pub fn inflow_concentration(&self) -> f64 {
        self.inflow_concentration
    }

    /// Post-pulse copy of `state`.
    pub fn apply(&self, state: &SimulationState) -> SimulationState {
        let mut out = *state;
        self.apply_in_place(&mut out);
        out
    }

    /// Overwrite the non-time fields of `state` with their post-pulse values.
    pub fn apply_in_place(&self, state: &mut SimulationState) {
        let keep = 1.0 - self.fraction_replaced;
        state.n_i *= keep;
        state.n_j *= keep;
        state.r = keep * state.r + self.fraction_replaced * self.inflow_concentration;
    }
}
