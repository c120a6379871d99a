use crate::error::VecSimError;

/// Compute the cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]`. If either vector has zero magnitude, or an
/// element is NaN or infinite, the similarity is 0.0. Vectors of different
/// length are rejected.
///
/// Uses f64 intermediate precision.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VecSimError> {
    if a.len() != b.len() {
        return Err(VecSimError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(cosine_similarity_unchecked(a, b))
}

/// Compute the cosine distance (`1 - cosine_similarity`) between two vectors.
///
/// Returns a value in `[0, 2]`; zero vectors are at distance 1.0 from
/// everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64, VecSimError> {
    Ok(1.0 - cosine_similarity(a, b)?)
}

/// Cosine similarity without the length check.
///
/// For callers that validated dimensionality once up front (clustering and
/// coverage scans) and then compare many pairs.
pub fn cosine_similarity_unchecked(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vecsim: unchecked length mismatch");

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for (&x, &y) in a.iter().zip(b) {
        let x = x as f64;
        let y = y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // sqrt of the product keeps sim(a, a) exactly 1.0.
    let similarity = dot / (norm_a * norm_b).sqrt();
    if similarity.is_nan() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}

/// Returns true if every element is 0.0 (or the vector is empty).
pub fn is_zero_vector(v: &[f32]) -> bool {
    v.iter().all(|&x| x == 0.0)
}

/// Normalizes a vector to unit length in-place. Zero vectors are left as is.
pub fn l2_normalize(v: &mut [f32]) {
    let mut sum: f64 = 0.0;
    for &x in v.iter() {
        sum += (x as f64) * (x as f64);
    }
    let norm = sum.sqrt();
    if norm > 0.0 {
        let scale = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
}
