//! The set of parameter combinations a sweep covers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{SweepError, SweepResult};

/// One point of the sweep: two cell sizes (µm³) and a pulse period (days).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub size_i: f64,
    pub size_j: f64,
    pub period: f64,
}

impl Combination {
    pub fn new(size_i: f64, size_j: f64, period: f64) -> Self {
        Self { size_i, size_j, period }
    }

    pub fn sizes(&self) -> [f64; 2] {
        [self.size_i, self.size_j]
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(size_i {}, size_j {}, period {})", self.size_i, self.size_j, self.period)
    }
}

/// Ordered list of combinations.  Report order follows this order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    combinations: Vec<Combination>,
}

impl SweepSpec {
    /// Cartesian product, `size_i` outermost and `period` innermost.
    pub fn grid(sizes_i: &[f64], sizes_j: &[f64], periods: &[f64]) -> Self {
        let mut combinations = Vec::with_capacity(sizes_i.len() * sizes_j.len() * periods.len());
        for &size_i in sizes_i {
            for &size_j in sizes_j {
                for &period in periods {
                    combinations.push(Combination { size_i, size_j, period });
                }
            }
        }
        Self { combinations }
    }

    pub fn from_combinations(combinations: Vec<Combination>) -> Self {
        Self { combinations }
    }

    /// `n` combinations with both sizes drawn log-uniformly from
    /// `[lo, hi]` and the period drawn uniformly from `periods`.
    /// The same `seed` always yields the same combinations.
    pub fn log_uniform(
        n:          usize,
        size_range: (f64, f64),
        periods:    &[f64],
        seed:       u64,
    ) -> SweepResult<Self> {
        let (lo, hi) = size_range;
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || hi < lo {
            return Err(SweepError::InvalidSpec(format!(
                "size range must satisfy 0 < lo <= hi, got ({lo}, {hi})"
            )));
        }
        if periods.is_empty() {
            return Err(SweepError::InvalidSpec("no pulse periods given".into()));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let (ln_lo, ln_hi) = (lo.ln(), hi.ln());
        let draw = |rng: &mut SmallRng| {
            if ln_hi > ln_lo { rng.gen_range(ln_lo..=ln_hi).exp() } else { lo }
        };
        let combinations = (0..n)
            .map(|_| {
                let size_i = draw(&mut rng);
                let size_j = draw(&mut rng);
                let period = periods[rng.gen_range(0..periods.len())];
                Combination { size_i, size_j, period }
            })
            .collect();
        Ok(Self { combinations })
    }

    pub fn push(&mut self, combination: Combination) {
        self.combinations.push(combination);
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}
