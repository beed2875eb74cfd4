//! `pp-sim` — the hybrid continuous/discrete simulation driver.
//!
//! # Cycle loop
//!
//! ```text
//! map sizes → kinetics; seed quotas at mid [Qmin, Qmax]
//! loop:
//!   ① Integrating      — integrate over {start} ∪ samples in (start, stop) ∪ {stop},
//!                         stop = min(start + period, end); append to trajectory.
//!   ② AtPulseBoundary  — overwrite the last point with Pulse::apply(last);
//!                         the time coordinate is kept.
//!   ③ Terminated       — once stop ≥ end.
//! post-process: drop earlier duplicates at each timestamp (keep the
//!               post-pulse entry), keep only requested sample times.
//! ```
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`schedule`]  | `PulseSchedule`, `SampleTimes`, `SampleSpec`                |
//! | [`config`]    | `RunConfig`, `InitialConditions`, `ToleranceConfig`          |
//! | [`adapter`]   | `integrate_cycle` — `SimulationState` ↔ solver bridge       |
//! | [`builder`]   | `DriverBuilder` — validation before any integration         |
//! | [`driver`]    | `Driver`, `Phase`, `RunOutput`                              |
//! | [`observer`]  | `DriverObserver`, `NoopObserver`, `LogObserver`, `Excursion` |
//! | [`error`]     | `ScheduleError`, `SimError`, `FailureKind`                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pp_core::MetaParameters;
//! use pp_sim::{DriverBuilder, NoopObserver, RunConfig};
//!
//! let driver = DriverBuilder::new(MetaParameters::default(), [100.0, 10_000.0], 14.0, RunConfig::default())
//!     .build()?;
//! let output = driver.run(&mut NoopObserver)?;
//! println!("{} samples", output.trajectory.len());
//! ```

pub mod adapter;
pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod schedule;


pub use adapter::integrate_cycle;
pub use builder::DriverBuilder;
pub use config::{InitialConditions, RunConfig, ToleranceConfig};
pub use driver::{Driver, Phase, RunOutput};
pub use error::{FailureKind, ScheduleError, SimError, SimResult};
pub use observer::{DriverObserver, Excursion, ExcursionKind, LogObserver, NoopObserver};
pub use schedule::{PulseSchedule, SampleSpec, SampleTimes};
