use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("invalid sweep specification: {0}")]
    InvalidSpec(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("{failed} of {total} combinations failed")]
    PartialFailure { failed: usize, total: usize },
}

pub type SweepResult<T> = Result<T, SweepError>;
