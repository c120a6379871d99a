//! Coverage of a reference feature list by a provided feature list.
//!
//! Every reference feature is matched against its most similar candidate;
//! it is covered when that similarity reaches the threshold. The result is a
//! [`Coverage`], which [`CoverageReport`] wraps with the metadata a report
//! store keeps.
//!
//! # Usage
//!
//! ```
//! use featcov_coverage::{analyze_coverage, CoverageReport, Feature, ReferenceFeature};
//!
//! let references = vec![
//!     ReferenceFeature::new("r1", "User login").with_embedding(vec![1.0, 0.0]),
//!     ReferenceFeature::new("r2", "Data export").with_embedding(vec![0.0, 1.0]),
//! ];
//! let provided = vec![Feature::new("f1", "Sign in").with_embedding(vec![0.99, 0.05])];
//!
//! let coverage = analyze_coverage(&references, &provided, 0.85).unwrap();
//! assert_eq!(coverage.covered_count(), 1);
//! assert_eq!(coverage.coverage_percentage(), Some(50.0));
//!
//! let report = CoverageReport::new(coverage, "feature_coverage")
//!     .unwrap()
//!     .with_threshold(0.85)
//!     .with_provided_features(provided.len());
//! assert!(report.success);
//! ```

mod analyze;
mod error;
mod feature;
mod report;

pub use analyze::{analyze_coverage, best_match, MatchResult, DEFAULT_THRESHOLD};
pub use error::CoverageError;
pub use feature::{Embedded, Feature, ReferenceFeature};
pub use report::{
    coverage_percentage, Coverage, CoverageReport, CoveredFeature, DataQualityIssue, ItemRole,
    MatchedFeature, UncoveredFeature,
};
