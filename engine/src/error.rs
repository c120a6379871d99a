use featcov_cluster::ClusterError;
use featcov_coverage::CoverageError;
use featcov_vecsim::VecSimError;
use thiserror::Error;

/// Rejections at the request boundary, before the engine runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("request: threshold must be between 0.0 and 1.0, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("request: epsilon must be a non-negative number, got {0}")]
    InvalidEpsilon(f64),

    #[error("request: min_points must be at least 1")]
    InvalidMinPoints,

    #[error("request: features list cannot be empty")]
    EmptyCandidates,

    #[error("request: feature {id} has no embedding")]
    MissingEmbedding { id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Vector(#[from] VecSimError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}
