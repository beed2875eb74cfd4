//! `pp-sweep` — run many independent simulations across a grid of cell sizes
//! and pulse periods.
//!
//! Each combination gets its own [`Driver`][pp_sim::Driver]; workers share
//! nothing but read-only copies of the metaparameters and run config.  One
//! failing combination never aborts the others: it is recorded in the
//! [`SweepReport`] with its parameters and failure kind.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`spec`]     | `Combination`, `SweepSpec`                          |
//! | [`runner`]   | `SweepRunner`, `SweepProgress`, `NoProgress`         |
//! | [`report`]   | `SweepOutcome`, `SweepReport`, `SummaryRow`          |
//! | [`error`]    | `SweepError`                                        |
//!
//! # Features
//!
//! | Feature    | Default | Effect                                      |
//! |------------|---------|---------------------------------------------|
//! | `parallel` | on      | Rayon thread pool; off runs sequentially    |

pub mod error;
pub mod report;
pub mod runner;
pub mod spec;

#[cfg(test)]
mod tests;

pub use error::{SweepError, SweepResult};
pub use report::{RunStatus, SummaryRow, SweepOutcome, SweepReport};
pub use runner::{NoProgress, SweepProgress, SweepRunner, default_worker_count};
pub use spec::{Combination, SweepSpec};
