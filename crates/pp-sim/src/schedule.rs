//! Pulse schedule and requested sample times.
//!
//! Cycle `c` (0-based) covers `[c·P, min((c+1)·P, end)]`.  Boundaries are
//! computed as `(c+1) as f64 * P` rather than by accumulation, so a sample
//! time produced by [`SampleTimes::regular`] with an interval that divides
//! `P` lands on the boundary bit-for-bit.

use serde::{Deserialize, Serialize};

use crate::ScheduleError;

// ── PulseSchedule ─────────────────────────────────────────────────────────────

/// Fixed-period pulse timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseSchedule {
    period: f64,
}

impl PulseSchedule {
    pub fn new(period: f64) -> Result<Self, ScheduleError> {
        if period.is_nan() || period <= 0.0 || period.is_infinite() {
            return Err(ScheduleError::NonPositivePeriod(period));
        }
        Ok(Self { period })
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Start of cycle `cycle`.
    #[inline]
    pub fn cycle_start(&self, cycle: usize) -> f64 {
        cycle as f64 * self.period
    }

    /// Pulse boundary that closes cycle `cycle`.
    #[inline]
    pub fn boundary(&self, cycle: usize) -> f64 {
        (cycle + 1) as f64 * self.period
    }

    /// End of cycle `cycle` once clipped to the run horizon.
    #[inline]
    pub fn cycle_stop(&self, cycle: usize, end_time: f64) -> f64 {
        self.boundary(cycle).min(end_time)
    }

    /// Number of integration cycles needed to reach `end_time`: the smallest
    /// `n ≥ 1` with `boundary(n - 1) ≥ end_time`.  Saturates at `usize::MAX`.
    pub fn cycle_count(&self, end_time: f64) -> usize {
        let estimate = (end_time / self.period).ceil();
        if estimate >= usize::MAX as f64 {
            return usize::MAX;
        }
        // The float quotient can be off by one either way.
        let mut n = (estimate as usize).max(1);
        while n > 1 && self.boundary(n - 2) >= end_time {
            n -= 1;
        }
        while self.boundary(n - 1) < end_time {
            n += 1;
        }
        n
    }
}

// ── SampleTimes ───────────────────────────────────────────────────────────────

/// Sorted, duplicate-free output times.  Always contains `0`; the largest
/// entry is the run end time.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleTimes {
    times: Vec<f64>,
}

impl SampleTimes {
    /// Build from an explicit list.  Order does not matter and duplicates are
    /// merged; `0` is added if absent.
    pub fn new(times: impl IntoIterator<Item = f64>) -> Result<Self, ScheduleError> {
        let mut out = vec![0.0];
        for t in times {
            if !t.is_finite() {
                return Err(ScheduleError::NonFiniteSample(t));
            }
            // Folds -0.0 into 0.0.
            out.push(t + 0.0);
        }
        out.sort_by(f64::total_cmp);
        out.dedup();

        let end = out[out.len() - 1];
        if let Some(&first) = out.first().filter(|t| **t < 0.0) {
            return Err(ScheduleError::SampleOutOfRange { time: first, end });
        }
        if end <= 0.0 {
            return Err(ScheduleError::EmptyHorizon);
        }
        Ok(Self { times: out })
    }

    /// `0, interval, 2·interval, …` up to and including `end`.  If `end` is
    /// not a multiple of `interval` it is appended as the last entry.
    pub fn regular(end: f64, interval: f64) -> Result<Self, ScheduleError> {
        if interval.is_nan() || interval <= 0.0 || interval.is_infinite() {
            return Err(ScheduleError::NonPositiveInterval(interval));
        }
        if !end.is_finite() {
            return Err(ScheduleError::NonFiniteSample(end));
        }
        if end <= 0.0 {
            return Err(ScheduleError::EmptyHorizon);
        }
        let mut times = Vec::new();
        let mut k = 0usize;
        loop {
            let t = k as f64 * interval;
            if t > end {
                break;
            }
            times.push(t);
            k += 1;
        }
        if times.last().is_some_and(|last| *last < end) {
            times.push(end);
        }
        Ok(Self { times })
    }

    /// The run horizon (largest sample time).
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Exact membership test.
    pub fn contains(&self, t: f64) -> bool {
        self.times.binary_search_by(|probe| probe.total_cmp(&t)).is_ok()
    }

    /// Solver output times for a cycle running from `start` to `stop`:
    /// `{start} ∪ {s : start < s < stop} ∪ {stop}`.
    pub fn cycle_times(&self, start: f64, stop: f64) -> Vec<f64> {
        let lo = self.times.partition_point(|t| *t <= start);
        let hi = self.times.partition_point(|t| *t < stop);
        let mut out = Vec::with_capacity(hi.saturating_sub(lo) + 2);
        out.push(start);
        if lo < hi {
            out.extend_from_slice(&self.times[lo..hi]);
        }
        out.push(stop);
        out
    }
}

// ── SampleSpec ────────────────────────────────────────────────────────────────

/// Serializable description of the sample times.
///
/// ```json
/// { "regular": { "end": 365.0, "interval": 1.0 } }
/// { "times": [7.0, 14.0, 21.0, 28.0] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSpec {
    Regular { end: f64, interval: f64 },
    Times(Vec<f64>),
}

impl Default for SampleSpec {
    fn default() -> Self {
        SampleSpec::Regular { end: 365.0, interval: 1.0 }
    }
}

impl SampleSpec {
    pub fn resolve(&self) -> Result<SampleTimes, ScheduleError> {
        match self {
            SampleSpec::Regular { end, interval } => SampleTimes::regular(*end, *interval),
            SampleSpec::Times(times) => SampleTimes::new(times.iter().copied()),
        }
    }
}
