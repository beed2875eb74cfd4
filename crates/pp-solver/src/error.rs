use thiserror::Error;

/// Integration failures.  None of these return a partial trajectory.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("bad time sequence: {0}")]
    BadTimeSequence(String),

    #[error("tolerances must be finite, relative ≥ 0 and absolute > 0")]
    InvalidTolerance,

    #[error("initial state is not finite")]
    NonFiniteInitialState,

    #[error("step size underflow at t = {t}")]
    StepSizeUnderflow { t: f64 },

    #[error("step limit of {max_steps} exceeded at t = {t}")]
    StepLimitExceeded { t: f64, max_steps: usize },

    #[error("iteration matrix is singular at t = {t}")]
    SingularMatrix { t: f64 },

    #[error("non-finite state encountered at t = {t}")]
    NonFinite { t: f64 },

    /// Any other failure reported by the underlying ODE solver.
    #[error("solver failed at t = {t}: {message}")]
    Backend { t: f64, message: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;
