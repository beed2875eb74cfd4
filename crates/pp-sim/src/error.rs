use pp_core::{CoreError, Strain};
use pp_model::ModelError;
use pp_solver::SolverError;
use thiserror::Error;

/// Problems with the pulse period or requested sample times.  Always raised
/// by [`DriverBuilder::build`][crate::DriverBuilder::build], before any
/// integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("pulse period must be positive and finite, got {0}")]
    NonPositivePeriod(f64),

    #[error("sample interval must be positive and finite, got {0}")]
    NonPositiveInterval(f64),

    #[error("sample time {0} is not finite")]
    NonFiniteSample(f64),

    #[error("sample time {time} lies outside [0, {end}]")]
    SampleOutOfRange { time: f64, end: f64 },

    #[error("no sample time after t = 0; the run has no horizon")]
    EmptyHorizon,

    #[error("pulse period {period} needs more than {max} cycles to reach t = {end}")]
    TooManyCycles { period: f64, end: f64, max: usize },
}

/// Coarse failure classification used when reporting per-run failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidKineticParameters,
    IntegrationFailure,
    ScheduleError,
    InvalidInput,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FailureKind::InvalidKineticParameters => "invalid_kinetic_parameters",
            FailureKind::IntegrationFailure       => "integration_failure",
            FailureKind::ScheduleError            => "schedule_error",
            FailureKind::InvalidInput             => "invalid_input",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("strain {strain}: {source}")]
    Kinetics {
        strain: Strain,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("integration failed in cycle {cycle} starting at t = {start}: {source}")]
    Integration {
        cycle:  usize,
        start:  f64,
        #[source]
        source: SolverError,
    },
}

impl SimError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SimError::Schedule(_) => FailureKind::ScheduleError,
            SimError::Kinetics { .. } => FailureKind::InvalidKineticParameters,
            SimError::Core(CoreError::InvalidKinetics { .. }) => FailureKind::InvalidKineticParameters,
            SimError::Core(_) | SimError::Model(_) | SimError::Config(_) => FailureKind::InvalidInput,
            SimError::Integration { .. } => FailureKind::IntegrationFailure,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
