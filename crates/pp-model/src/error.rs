use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("fraction replaced must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("inflow concentration must be finite and non-negative, got {0}")]
    InvalidInflow(f64),
}

pub type ModelResult<T> = Result<T, ModelError>;
