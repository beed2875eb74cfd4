//! Metaparameters: the allometric/Arrhenius scaling laws shared by both
//! strains.
//!
//! Every size-dependent kinetic constant `X` follows
//!
//! ```text
//! X(size, T) = a · size^b · exp(E · (T − T0) / (k · T · T0))
//! ```
//!
//! where `a` is the coefficient, `b` the allometric exponent, `E` the
//! activation energy (eV), `k` Boltzmann's constant and `T0` the reference
//! temperature.  A `MetaParameters` value is immutable once built and is
//! shared read-only by every worker of a sweep.

use crate::constants::DEFAULT_REFERENCE_TEMPERATURE;
use crate::kinetics::arrhenius;
use crate::{CoreError, CoreResult};

// ── ScalingLaw ────────────────────────────────────────────────────────────────

/// One allometric power law with an Arrhenius temperature correction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingLaw {
    /// Value at `size = 1` and `T = T0`.
    pub coefficient:       f64,
    /// Allometric exponent applied to cell size.
    pub exponent:          f64,
    /// Activation energy in eV.  Zero disables the temperature correction.
    pub activation_energy: f64,
}

impl ScalingLaw {
    pub const fn new(coefficient: f64, exponent: f64, activation_energy: f64) -> Self {
        Self { coefficient, exponent, activation_energy }
    }

    /// Evaluate the law for `size` at `temperature`, relative to `reference`.
    #[inline]
    pub fn evaluate(&self, size: f64, temperature: f64, reference: f64) -> f64 {
        self.coefficient
            * size.powf(self.exponent)
            * arrhenius(self.activation_energy, temperature, reference)
    }

    fn is_finite(&self) -> bool {
        self.coefficient.is_finite()
            && self.exponent.is_finite()
            && self.activation_energy.is_finite()
    }
}

// ── MetaParameters ────────────────────────────────────────────────────────────

/// The full set of scaling laws plus the reference and ambient temperatures.
///
/// Typically built with [`MetaParameters::default`] and tweaked, or loaded
/// from JSON by the application crate (requires the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetaParameters {
    /// Minimum internal quota `Qmin` (µmol N cell⁻¹).
    pub qmin:                  ScalingLaw,
    /// Maximum internal quota `Qmax` (µmol N cell⁻¹).
    pub qmax:                  ScalingLaw,
    /// Maximum uptake rate `Vmax` (µmol N cell⁻¹ d⁻¹).
    pub vmax:                  ScalingLaw,
    /// Maximum realised growth rate `mu_max` (d⁻¹); only used to derive
    /// `mu_inf`.
    pub mu_max:                ScalingLaw,
    /// Uptake half-saturation `H_up` before division by absolute temperature.
    pub half_saturation:       ScalingLaw,
    /// Mortality rate `m` (d⁻¹).
    pub mortality:             ScalingLaw,
    /// `T0` in Kelvin.
    pub reference_temperature: f64,
    /// Ambient temperature `T` in Kelvin.
    pub temperature:           f64,
}

impl Default for MetaParameters {
    fn default() -> Self {
        Self {
            qmin:                  ScalingLaw::new(1.36e-9, 0.77, 0.0),
            qmax:                  ScalingLaw::new(1.77e-8, 0.81, 0.0),
            vmax:                  ScalingLaw::new(9.1e-9, 0.67, 0.46),
            mu_max:                ScalingLaw::new(4.7, -0.26, 0.46),
            half_saturation:       ScalingLaw::new(50.0, 0.27, 0.0),
            mortality:             ScalingLaw::new(0.1, 0.0, 0.46),
            reference_temperature: DEFAULT_REFERENCE_TEMPERATURE,
            temperature:           DEFAULT_REFERENCE_TEMPERATURE,
        }
    }
}

impl MetaParameters {
    /// Return a copy with the ambient temperature replaced.
    pub fn at_temperature(&self, temperature: f64) -> Self {
        Self { temperature, ..self.clone() }
    }

    /// All laws paired with their names, in a fixed order.
    pub fn laws(&self) -> [(&'static str, &ScalingLaw); 6] {
        [
            ("qmin", &self.qmin),
            ("qmax", &self.qmax),
            ("vmax", &self.vmax),
            ("mu_max", &self.mu_max),
            ("half_saturation", &self.half_saturation),
            ("mortality", &self.mortality),
        ]
    }

    /// Check that every coefficient is finite and `T0` is usable.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, law) in self.laws() {
            if !law.is_finite() {
                return Err(CoreError::InvalidMeta(format!("{name} has a non-finite term")));
            }
        }
        if !self.reference_temperature.is_finite() || self.reference_temperature == 0.0 {
            return Err(CoreError::InvalidMeta(format!(
                "reference temperature must be finite and nonzero, got {}",
                self.reference_temperature
            )));
        }
        if !self.temperature.is_finite() {
            return Err(CoreError::InvalidMeta("temperature is not finite".into()));
        }
        Ok(())
    }
}
