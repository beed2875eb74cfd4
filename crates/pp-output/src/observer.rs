//! `RunOutputObserver<W>` — bridges `DriverObserver` to an `OutputWriter`.

use pp_core::SimulationState;
use pp_sim::{DriverObserver, RunOutput};

use crate::row::{PulseRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DriverObserver`] that writes pulse events as they happen and the
/// trajectory once the run ends.
///
/// Errors from the writer are stored internally because `DriverObserver`
/// methods have no return value.  After `driver.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `driver.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DriverObserver for RunOutputObserver<W> {
    fn on_pulse(&mut self, t: f64, pre: &SimulationState, post: &SimulationState) {
        let result = self.writer.write_pulse(&PulseRow::new(t, pre, post));
        self.store_err(result);
    }

    fn on_run_end(&mut self, output: &RunOutput) {
        let rows: Vec<TrajectoryRow> = output.trajectory.iter().map(TrajectoryRow::from).collect();
        let result = self.writer.write_trajectory(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
