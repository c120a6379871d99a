use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VecSimError {
    #[error("vecsim: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("vecsim: dimension mismatch for {id}: expected {expected}, got {got}")]
    InconsistentDimension {
        id: String,
        expected: usize,
        got: usize,
    },

    #[error("vecsim: length mismatch: {ids} ids, {vectors} vectors")]
    LengthMismatch { ids: usize, vectors: usize },

    #[error("vecsim: empty vector for {id}")]
    EmptyVector { id: String },
}
