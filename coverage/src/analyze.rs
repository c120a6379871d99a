use featcov_vecsim::{cosine_similarity_unchecked, VecSimError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoverageError;
use crate::feature::{Embedded, Feature, ReferenceFeature};
use crate::report::{
    Coverage, CoveredFeature, DataQualityIssue, ItemRole, MatchedFeature, UncoveredFeature,
};

/// Default similarity a candidate must reach to cover a reference feature.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Outcome of scoring one query against a candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Best candidate, if any candidate scored above zero.
    pub candidate_id: Option<String>,
    /// Best similarity found; 0.0 without a candidate.
    pub similarity: f64,
    /// A candidate exists and `similarity >= threshold`.
    pub covered: bool,
}

impl MatchResult {
    fn new(candidate_id: Option<String>, similarity: f64, threshold: f64) -> Self {
        let covered = candidate_id.is_some() && similarity >= threshold;
        Self {
            candidate_id,
            similarity,
            covered,
        }
    }
}

/// Index of the best candidate and its similarity.
struct Best {
    index: Option<usize>,
    similarity: f64,
}

/// Linear scan keeping the first strictly greater similarity. Starting at
/// 0.0 means ties go to the earliest candidate and non-positive scores never
/// win. Candidates without an embedding are skipped.
fn scan<C: Embedded>(query: &[f32], candidates: &[C]) -> Best {
    let mut best = Best {
        index: None,
        similarity: 0.0,
    };
    for (i, candidate) in candidates.iter().enumerate() {
        let Some(emb) = candidate.embedding() else {
            continue;
        };
        let sim = cosine_similarity_unchecked(query, emb);
        if sim > best.similarity {
            best = Best {
                index: Some(i),
                similarity: sim,
            };
        }
    }
    best
}

/// Every embedding present in `items` must have `dim` elements.
fn check_pool<T: Embedded>(items: &[T], dim: &mut Option<usize>) -> Result<(), VecSimError> {
    for item in items {
        let Some(emb) = item.embedding() else {
            continue;
        };
        match *dim {
            None => *dim = Some(emb.len()),
            Some(expected) if expected != emb.len() => {
                return Err(VecSimError::InconsistentDimension {
                    id: item.id().to_string(),
                    expected,
                    got: emb.len(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Finds the candidate most similar to `query`.
pub fn best_match<C: Embedded>(
    query: &[f32],
    candidates: &[C],
    threshold: f64,
) -> Result<MatchResult, CoverageError> {
    let mut dim = Some(query.len());
    check_pool(candidates, &mut dim)?;

    let best = scan(query, candidates);
    let id = best.index.map(|i| candidates[i].id().to_string());
    Ok(MatchResult::new(id, best.similarity, threshold))
}

/// Checks which reference features are covered by the candidates.
///
/// Each reference is matched to its most similar candidate; it counts as
/// covered when that similarity reaches `threshold`. Uncovered references
/// keep their closest similarity. Items without an embedding are recorded
/// as data-quality issues and take no part in the comparison.
///
/// The threshold is used as given; range checks belong to the caller.
pub fn analyze_coverage(
    references: &[ReferenceFeature],
    candidates: &[Feature],
    threshold: f64,
) -> Result<Coverage, CoverageError> {
    let mut dim = None;
    check_pool(candidates, &mut dim)?;
    check_pool(references, &mut dim)?;

    let mut coverage = Coverage::new();

    for candidate in candidates.iter().filter(|c| c.embedding().is_none()) {
        warn!(
            feature_id = %candidate.id,
            feature = %candidate.feature,
            "skipping candidate without embedding"
        );
        coverage.record_issue(DataQualityIssue::missing_embedding(
            candidate.id.clone(),
            ItemRole::Candidate,
        ));
    }

    for reference in references {
        let Some(query) = reference.embedding() else {
            warn!(reference_id = %reference.id, "reference feature has no embedding");
            coverage.record_issue(DataQualityIssue::missing_embedding(
                reference.id.clone(),
                ItemRole::Reference,
            ));
            coverage.add_uncovered(UncoveredFeature {
                reference_feature_id: reference.id.clone(),
                similarity: 0.0,
            });
            continue;
        };

        let best = scan(query, candidates);
        match best.index {
            Some(i) if best.similarity >= threshold => {
                coverage.add_covered(CoveredFeature {
                    reference_feature_id: reference.id.clone(),
                    matched_feature: MatchedFeature::from(&candidates[i]),
                    similarity: best.similarity,
                });
            }
            _ => {
                coverage.add_uncovered(UncoveredFeature {
                    reference_feature_id: reference.id.clone(),
                    similarity: best.similarity,
                });
            }
        }
    }

    let pct = coverage.compute_percentage();
    debug!(
        references = references.len(),
        candidates = candidates.len(),
        covered = coverage.covered_count(),
        uncovered = coverage.uncovered_count(),
        percentage = pct,
        threshold,
        "coverage analysis done"
    );

    Ok(coverage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(id: &str, v: &[f32]) -> ReferenceFeature {
        ReferenceFeature::new(id, id).with_embedding(v.to_vec())
    }

    fn candidate(id: &str, v: &[f32]) -> Feature {
        Feature::new(id, format!("feature {id}"))
            .with_description(format!("description of {id}"))
            .with_embedding(v.to_vec())
    }

    #[test]
    fn identical_vectors_are_covered() {
        let refs = [reference("r1", &[1.0, 0.0, 0.0])];
        let cands = [candidate("c1", &[1.0, 0.0, 0.0])];
        let cov = analyze_coverage(&refs, &cands, 0.85).unwrap();

        assert_eq!(cov.covered_count(), 1);
        assert_eq!(cov.coverage_percentage(), Some(100.0));
        let hit = &cov.covered_features()[0];
        assert_eq!(hit.similarity, 1.0);
        assert_eq!(hit.matched_feature.id, "c1");
        assert_eq!(hit.matched_feature.feature, "feature c1");
        assert_eq!(hit.matched_feature.description, "description of c1");
    }

    #[test]
    fn orthogonal_vectors_are_uncovered() {
        let refs = [reference("r1", &[1.0, 0.0, 0.0])];
        let cands = [candidate("c1", &[0.0, 1.0, 0.0])];
        let cov = analyze_coverage(&refs, &cands, 0.85).unwrap();

        assert_eq!(cov.uncovered_count(), 1);
        assert_eq!(cov.uncovered_features()[0].similarity, 0.0);
        assert_eq!(cov.coverage_percentage(), Some(0.0));
    }

    #[test]
    fn uncovered_keeps_nearest_miss() {
        // cos = 0.8 against threshold 0.85.
        let refs = [reference("r1", &[1.0, 0.0])];
        let cands = [candidate("c1", &[0.8, 0.6])];
        let cov = analyze_coverage(&refs, &cands, 0.85).unwrap();

        let miss = &cov.uncovered_features()[0];
        assert!((miss.similarity - 0.8).abs() < 1e-6, "got {}", miss.similarity);
    }

    #[test]
    fn best_of_several_candidates_wins() {
        let refs = [reference("r1", &[1.0, 0.0])];
        let cands = [
            candidate("far", &[0.0, 1.0]),
            candidate("close", &[0.95, 0.05]),
            candidate("closer", &[1.0, 0.01]),
        ];
        let cov = analyze_coverage(&refs, &cands, 0.85).unwrap();
        assert_eq!(cov.covered_features()[0].matched_feature.id, "closer");
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let refs = [reference("r1", &[1.0, 0.0])];
        let cands = [
            candidate("first", &[2.0, 0.0]),
            candidate("second", &[1.0, 0.0]),
        ];
        let cov = analyze_coverage(&refs, &cands, 0.5).unwrap();
        assert_eq!(cov.covered_features()[0].matched_feature.id, "first");
    }

    #[test]
    fn threshold_is_inclusive() {
        let refs = [reference("r1", &[1.0, 0.0])];
        let cands = [candidate("c1", &[1.0, 0.0])];
        let cov = analyze_coverage(&refs, &cands, 1.0).unwrap();
        assert_eq!(cov.covered_count(), 1);

        let cov = analyze_coverage(&refs, &cands, 1.1).unwrap();
        assert_eq!(cov.covered_count(), 0);
        assert_eq!(cov.uncovered_features()[0].similarity, 1.0);
    }

    #[test]
    fn negative_similarity_never_matches() {
        let refs = [reference("r1", &[1.0, 0.0])];
        let cands = [candidate("opposite", &[-1.0, 0.0])];
        let cov = analyze_coverage(&refs, &cands, -1.0).unwrap();
        assert_eq!(cov.covered_count(), 0);
        assert_eq!(cov.uncovered_features()[0].similarity, 0.0);
    }

    #[test]
    fn missing_embeddings_are_recorded_not_fatal() {
        let refs = [
            reference("r1", &[1.0, 0.0]),
            ReferenceFeature::new("r2", "no vector"),
        ];
        let cands = [
            Feature::new("c0", "no vector"),
            Feature::new("c1", "empty vector").with_embedding(vec![]),
            candidate("c2", &[1.0, 0.0]),
        ];
        let cov = analyze_coverage(&refs, &cands, 0.85).unwrap();

        assert_eq!(cov.covered_count(), 1);
        assert_eq!(cov.uncovered_count(), 1);
        assert_eq!(cov.uncovered_features()[0].reference_feature_id, "r2");
        assert_eq!(cov.uncovered_features()[0].similarity, 0.0);

        let issues: Vec<(&str, ItemRole)> = cov
            .data_quality()
            .iter()
            .map(|i| (i.item_id.as_str(), i.role))
            .collect();
        assert_eq!(
            issues,
            vec![
                ("c0", ItemRole::Candidate),
                ("c1", ItemRole::Candidate),
                ("r2", ItemRole::Reference),
            ]
        );
    }

    #[test]
    fn empty_inputs() {
        let cov = analyze_coverage(&[], &[], 0.85).unwrap();
        assert_eq!(cov.total(), 0);
        assert_eq!(cov.coverage_percentage(), Some(0.0));

        let refs = [reference("r1", &[1.0, 0.0])];
        let cov = analyze_coverage(&refs, &[], 0.85).unwrap();
        assert_eq!(cov.uncovered_count(), 1);
        assert_eq!(cov.uncovered_features()[0].similarity, 0.0);
    }

    #[test]
    fn dimension_mismatch_fails_fast() {
        let refs = [reference("r1", &[1.0, 0.0, 0.0])];
        let cands = [candidate("c1", &[1.0, 0.0])];
        let err = analyze_coverage(&refs, &cands, 0.85).unwrap_err();
        assert_eq!(
            err,
            CoverageError::Vector(VecSimError::InconsistentDimension {
                id: "r1".into(),
                expected: 2,
                got: 3,
            })
        );
    }

    #[test]
    fn best_match_result() {
        let cands = [candidate("a", &[0.0, 1.0]), candidate("b", &[1.0, 0.0])];
        let m = best_match(&[1.0, 0.0], &cands, 0.85).unwrap();
        assert_eq!(m.candidate_id.as_deref(), Some("b"));
        assert_eq!(m.similarity, 1.0);
        assert!(m.covered);

        let none = best_match::<Feature>(&[1.0, 0.0], &[], 0.0).unwrap();
        assert_eq!(none.candidate_id, None);
        assert_eq!(none.similarity, 0.0);
        assert!(!none.covered);

        assert!(best_match(&[1.0], &cands, 0.85).is_err());
    }
}
