//! Cosine similarity over dense embedding vectors.
//!
//! Every other featcov crate measures closeness through this one metric.
//!
//! ```
//! use featcov_vecsim::{cosine_distance, cosine_similarity};
//!
//! let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
//! assert_eq!(sim, 1.0);
//!
//! let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
//! assert_eq!(d, 1.0);
//!
//! // Zero vectors are never similar to anything.
//! assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
//! ```

pub mod cosine;
pub mod error;
pub mod vector;

pub use cosine::{
    cosine_distance, cosine_similarity, cosine_similarity_unchecked, is_zero_vector, l2_normalize,
};
pub use error::VecSimError;
pub use vector::{check_dimensions, IdentifiedVector};
