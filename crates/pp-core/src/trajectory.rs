//! `Trajectory` — the time-ordered output of one driver run.

use crate::{Field, SimulationState, Strain};

/// Ordered sequence of states.
///
/// The driver appends cycle output as it goes (so boundary instants appear
/// twice) and calls [`dedup_keep_last`][Self::dedup_keep_last] before handing
/// the trajectory out; after that, timestamps are strictly increasing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    points: Vec<SimulationState>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { points: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, state: SimulationState) {
        self.points.push(state);
    }

    pub fn extend<I: IntoIterator<Item = SimulationState>>(&mut self, states: I) {
        self.points.extend(states);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SimulationState] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationState> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&SimulationState> {
        self.points.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut SimulationState> {
        self.points.last_mut()
    }

    /// Alias of [`last`][Self::last] for readability at call sites that
    /// reduce a run to its end state.
    pub fn final_state(&self) -> Option<&SimulationState> {
        self.points.last()
    }

    pub fn into_points(self) -> Vec<SimulationState> {
        self.points
    }

    /// Collapse runs of identical timestamps, keeping the entry appended
    /// last.  Returns the number of entries removed.
    ///
    /// At a pulse boundary the later entry is the post-mixing state, so the
    /// retained point reflects the pulse.
    pub fn dedup_keep_last(&mut self) -> usize {
        let before = self.points.len();
        let mut kept: Vec<SimulationState> = Vec::with_capacity(before);
        for p in self.points.drain(..) {
            match kept.last_mut() {
                Some(last) if last.t == p.t => *last = p,
                _ => kept.push(p),
            }
        }
        self.points = kept;
        before - self.points.len()
    }

    /// Keep only the states for which `keep` returns `true`.
    pub fn retain<F: FnMut(&SimulationState) -> bool>(&mut self, keep: F) {
        self.points.retain(keep);
    }

    /// `true` if every timestamp is strictly greater than the previous one.
    pub fn is_strictly_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[0].t < w[1].t)
    }

    pub fn times(&self) -> Vec<f64> {
        self.column(Field::Time)
    }

    /// One column of the trajectory, in time order.
    pub fn column(&self, field: Field) -> Vec<f64> {
        self.points.iter().map(|p| p.field(field)).collect()
    }

    /// The state recorded at exactly `t`, if any.
    pub fn at_time(&self, t: f64) -> Option<&SimulationState> {
        self.points.iter().find(|p| p.t == t)
    }

    /// Strain with the larger final population; `None` for an empty
    /// trajectory or an exact tie.
    pub fn winner(&self) -> Option<Strain> {
        let last = self.points.last()?;
        if last.n_i > last.n_j {
            Some(Strain::I)
        } else if last.n_j > last.n_i {
            Some(Strain::J)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item     = &'a SimulationState;
    type IntoIter = std::slice::Iter<'a, SimulationState>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<SimulationState>> for Trajectory {
    fn from(points: Vec<SimulationState>) -> Self {
        Self { points }
    }
}
