use featcov_vecsim::VecSimError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    #[error("coverage: {0}")]
    Vector(#[from] VecSimError),

    #[error("coverage: coverage percentage not computed")]
    NotFinalized,

    #[error("coverage: report name cannot be empty")]
    MissingReportName,
}
