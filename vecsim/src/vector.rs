use serde::{Deserialize, Serialize};

use crate::error::VecSimError;

/// An embedding paired with the caller's identifier for it.
///
/// Identifiers are opaque; uniqueness within one call is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedVector {
    pub id: String,
    pub vector: Vec<f32>,
}

impl IdentifiedVector {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }

    /// Pairs identifiers with vectors positionally.
    /// Both slices must have the same length.
    pub fn zip<S: AsRef<str>>(ids: &[S], vectors: &[Vec<f32>]) -> Result<Vec<Self>, VecSimError> {
        if ids.len() != vectors.len() {
            return Err(VecSimError::LengthMismatch {
                ids: ids.len(),
                vectors: vectors.len(),
            });
        }
        Ok(ids
            .iter()
            .zip(vectors)
            .map(|(id, v)| Self::new(id.as_ref(), v.clone()))
            .collect())
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.vector
    }
}

/// Checks that every vector is non-empty and shares one dimensionality.
///
/// Returns the common dimension, or `None` for an empty input.
pub fn check_dimensions(items: &[IdentifiedVector]) -> Result<Option<usize>, VecSimError> {
    let Some(first) = items.first() else {
        return Ok(None);
    };
    let dim = first.dimension();
    for item in items {
        if item.vector.is_empty() {
            return Err(VecSimError::EmptyVector {
                id: item.id.clone(),
            });
        }
        if item.dimension() != dim {
            return Err(VecSimError::InconsistentDimension {
                id: item.id.clone(),
                expected: dim,
                got: item.dimension(),
            });
        }
    }
    Ok(Some(dim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_pairs_in_order() {
        let items =
            IdentifiedVector::zip(&["a", "b"], &[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].vector, vec![0.0, 1.0]);
    }

    #[test]
    fn zip_length_mismatch() {
        let err = IdentifiedVector::zip(&["a", "b", "c"], &[vec![1.0]]).unwrap_err();
        assert_eq!(err, VecSimError::LengthMismatch { ids: 3, vectors: 1 });
    }

    #[test]
    fn check_dimensions_ok() {
        let items = vec![
            IdentifiedVector::new("a", vec![1.0, 2.0, 3.0]),
            IdentifiedVector::new("b", vec![0.0, 0.0, 0.0]),
        ];
        assert_eq!(check_dimensions(&items).unwrap(), Some(3));
        assert_eq!(check_dimensions(&[]).unwrap(), None);
    }

    #[test]
    fn check_dimensions_rejects_empty_vector() {
        let items = vec![
            IdentifiedVector::new("a", vec![1.0]),
            IdentifiedVector::new("b", vec![]),
        ];
        let err = check_dimensions(&items).unwrap_err();
        assert_eq!(err, VecSimError::EmptyVector { id: "b".into() });
    }

    #[test]
    fn check_dimensions_rejects_mixed_dimensions() {
        let items = vec![
            IdentifiedVector::new("a", vec![1.0, 0.0]),
            IdentifiedVector::new("b", vec![1.0, 0.0, 0.0]),
        ];
        let err = check_dimensions(&items).unwrap_err();
        assert_eq!(
            err,
            VecSimError::InconsistentDimension {
                id: "b".into(),
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn serde_shape() {
        let v = IdentifiedVector::new("f1", vec![0.5, 0.25]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"id":"f1","vector":[0.5,0.25]}"#);
    }
}
