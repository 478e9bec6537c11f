//! Error kinds raised by the simulation core and its collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Empty return series: {0}")]
    EmptyReturns(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}

pub type Result<T> = std::result::Result<T, SimError>;

