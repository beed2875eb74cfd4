//! CSV output backend.
//!
//! [`CsvWriter`] creates two files in the configured output directory:
//! - `trajectory.csv`
//! - `pulses.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use pp_core::Trajectory;
use pp_sweep::SummaryRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, PulseRow, SUMMARY_HEADER, TrajectoryRow, trajectory_header};

/// Writes one run's output to two CSV files.
pub struct CsvWriter {
    trajectory: Writer<File>,
    pulses:     Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectory = Writer::from_path(dir.join("trajectory.csv"))?;
        trajectory.write_record(trajectory_header())?;

        let mut pulses = Writer::from_path(dir.join("pulses.csv"))?;
        pulses.write_record(["time", "N_i_pre", "N_j_pre", "R_pre", "N_i_post", "N_j_post", "R_post"])?;

        Ok(Self { trajectory, pulses, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trajectory(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectory.write_record(row.to_record())?;
        }
        Ok(())
    }

    fn write_pulse(&mut self, row: &PulseRow) -> OutputResult<()> {
        self.pulses.write_record(
            [row.time, row.n_i_pre, row.n_j_pre, row.r_pre, row.n_i_post, row.n_j_post, row.r_post]
                .map(|v| v.to_string()),
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectory.flush()?;
        self.pulses.flush()?;
        Ok(())
    }
}

/// Write `trajectory` to a single CSV file at `path`.
pub fn write_trajectory_csv(path: &Path, trajectory: &Trajectory) -> OutputResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record(trajectory_header())?;
    for state in trajectory {
        w.write_record(TrajectoryRow::from(state).to_record())?;
    }
    w.flush()?;
    Ok(())
}

/// Write sweep summary rows to `path`.  Missing values (failed runs) are
/// written as empty fields.
pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> OutputResult<()> {
    fn opt(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }

    let mut w = Writer::from_path(path)?;
    w.write_record(SUMMARY_HEADER)?;
    for row in rows {
        w.write_record([
            row.size_i.to_string(),
            row.size_j.to_string(),
            row.period.to_string(),
            row.status.to_string(),
            opt(row.final_n_i),
            opt(row.final_n_j),
            opt(row.final_r),
            row.winner.clone().unwrap_or_default(),
            row.error.clone().unwrap_or_default(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
