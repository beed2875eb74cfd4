//! Size/temperature → kinetic parameter mapping.
//!
//! The mapper is a pure closed-form function: cheap, deterministic and safe
//! to call from any number of threads.  Any combination that would produce
//! non-physical rates is rejected with [`CoreError::InvalidKinetics`] rather
//! than returned as silently-wrong numbers.

use crate::constants::BOLTZMANN_EV;
use crate::{CoreError, CoreResult, KineticsViolation, MetaParameters};

/// Arrhenius-style correction factor `exp(E·(T − T0) / (k·T·T0))`.
#[inline]
pub fn arrhenius(activation_energy: f64, temperature: f64, reference: f64) -> f64 {
    (activation_energy * (temperature - reference) / (BOLTZMANN_EV * temperature * reference)).exp()
}

/// Per-strain rate constants consumed by the dynamics model.
///
/// Construct through [`KineticParameters::from_size`] (the mapper) or
/// [`KineticParameters::new`]; both enforce `Qmax > Qmin > 0`, `Vmax > 0`,
/// and non-negative finite rates.  Those invariants are the precondition
/// under which the right-hand side is well defined.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KineticParameters {
    pub qmin:            f64,
    pub qmax:            f64,
    pub vmax:            f64,
    pub mu_inf:          f64,
    pub half_saturation: f64,
    pub mortality:       f64,
}

impl KineticParameters {
    /// Build from explicit values, checking every invariant.
    pub fn new(
        qmin:            f64,
        qmax:            f64,
        vmax:            f64,
        mu_inf:          f64,
        half_saturation: f64,
        mortality:       f64,
    ) -> Result<Self, KineticsViolation> {
        let k = Self { qmin, qmax, vmax, mu_inf, half_saturation, mortality };
        k.check()?;
        Ok(k)
    }

    /// Map `size` at the ambient temperature held in `meta`.
    pub fn from_size(size: f64, meta: &MetaParameters) -> CoreResult<Self> {
        Self::from_size_at(size, meta.temperature, meta)
    }

    /// Map `size` at an explicit `temperature` (Kelvin).
    pub fn from_size_at(size: f64, temperature: f64, meta: &MetaParameters) -> CoreResult<Self> {
        let invalid = |violation| CoreError::InvalidKinetics { size, temperature, violation };

        if size.is_nan() || size <= 0.0 {
            return Err(invalid(KineticsViolation::NonPositiveSize));
        }
        if temperature.is_nan() || temperature <= 0.0 {
            return Err(invalid(KineticsViolation::NonPositiveTemperature));
        }

        let t0 = meta.reference_temperature;
        let qmin   = meta.qmin.evaluate(size, temperature, t0);
        let qmax   = meta.qmax.evaluate(size, temperature, t0);
        let vmax   = meta.vmax.evaluate(size, temperature, t0);
        let mu_max = meta.mu_max.evaluate(size, temperature, t0);
        let half_saturation = meta.half_saturation.evaluate(size, temperature, t0) / temperature;
        let mortality = meta.mortality.evaluate(size, temperature, t0);

        for (name, value) in [("Qmin", qmin), ("Qmax", qmax), ("Vmax", vmax), ("mu_max", mu_max)] {
            if !value.is_finite() {
                return Err(invalid(KineticsViolation::NonFinite(name)));
            }
        }

        // Quota ordering is checked before the denominator so the reported
        // violation names the root cause.
        if qmax <= qmin {
            return Err(invalid(KineticsViolation::QuotaOrdering));
        }

        let span = qmax - qmin;
        let denominator = vmax * span - mu_max * qmin * span;
        if denominator.is_nan() || denominator <= 0.0 {
            return Err(invalid(KineticsViolation::GrowthDenominator));
        }
        let mu_inf = mu_max * vmax * qmax / denominator;

        Self::new(qmin, qmax, vmax, mu_inf, half_saturation, mortality).map_err(invalid)
    }

    fn check(&self) -> Result<(), KineticsViolation> {
        let named = [
            ("Qmin", self.qmin),
            ("Qmax", self.qmax),
            ("Vmax", self.vmax),
            ("mu_inf", self.mu_inf),
            ("H_up", self.half_saturation),
            ("m", self.mortality),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(KineticsViolation::NonFinite(name));
            }
        }
        if self.qmin <= 0.0 {
            return Err(KineticsViolation::NonPositiveQmin);
        }
        if self.qmax <= self.qmin {
            return Err(KineticsViolation::QuotaOrdering);
        }
        if self.vmax <= 0.0 {
            return Err(KineticsViolation::NonPositiveVmax);
        }
        if self.half_saturation <= 0.0 {
            return Err(KineticsViolation::NonPositiveHalfSaturation);
        }
        if self.mu_inf < 0.0 {
            return Err(KineticsViolation::NegativeRate("mu_inf"));
        }
        if self.mortality < 0.0 {
            return Err(KineticsViolation::NegativeRate("m"));
        }
        Ok(())
    }

    /// `Qmax − Qmin`; strictly positive by construction.
    #[inline]
    pub fn quota_span(&self) -> f64 {
        self.qmax - self.qmin
    }

    /// Midpoint of `[Qmin, Qmax]`, used to seed the initial quota.
    #[inline]
    pub fn quota_midpoint(&self) -> f64 {
        0.5 * (self.qmin + self.qmax)
    }
}
