//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PulseRow, TrajectoryRow};

/// Sink for one run's output.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`RunOutputObserver::take_error`][crate::RunOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of sampled states.
    fn write_trajectory(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one pulse event.
    fn write_pulse(&mut self, row: &PulseRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
