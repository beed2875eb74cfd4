//! `pp-output` — CSV output for single runs and sweeps.
//!
//! | Writer / function        | Files created                        |
//! |--------------------------|--------------------------------------|
//! | [`CsvWriter`]            | `trajectory.csv`, `pulses.csv`       |
//! | [`write_trajectory_csv`] | one trajectory file at a given path  |
//! | [`write_summary_csv`]    | one sweep summary file               |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`RunOutputObserver`], which implements `pp_sim::DriverObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pp_output::{CsvWriter, RunOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RunOutputObserver::new(writer);
//! driver.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::{CsvWriter, write_summary_csv, write_trajectory_csv};
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::{PulseRow, SUMMARY_HEADER, TrajectoryRow, trajectory_header};
pub use writer::OutputWriter;
