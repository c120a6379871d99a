use featcov_vecsim::VecSimError;
use thiserror::Error;

/// Errors returned by clustering operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    #[error("cluster: invalid input: {0}")]
    InvalidInput(#[from] VecSimError),

    #[error("cluster: invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
