//! One stateless service over the similarity toolkit.
//!
//! [`SimilarityEngine`] exposes the metric, both clustering strategies,
//! consolidation and coverage analysis. The [`request`] module holds the
//! shapes loose input is decoded into and validates them before anything
//! is computed.
//!
//! # Usage
//!
//! ```
//! use featcov_engine::{CoverageRequest, Feature, ReferenceFeature, SimilarityEngine};
//!
//! let req = CoverageRequest::new(
//!     vec![
//!         ReferenceFeature::new("r1", "Login").with_embedding(vec![1.0, 0.0, 0.0]),
//!         ReferenceFeature::new("r2", "Audit log").with_embedding(vec![0.0, 0.0, 1.0]),
//!     ],
//!     vec![Feature::new("f1", "Sign in").with_embedding(vec![0.99, 0.05, 0.0])],
//! );
//!
//! let report = SimilarityEngine::new().run_coverage(&req).unwrap();
//! assert_eq!(report.coverage.covered_count(), 1);
//! assert_eq!(report.percentage(), 50.0);
//! ```

mod engine;
mod error;
pub mod request;

pub use engine::{SimilarityEngine, DEFAULT_CONSOLIDATION_THRESHOLD};
pub use error::{EngineError, RequestError};
pub use request::{ClusterRequest, CoverageRequest, Strategy, DEFAULT_REPORT_NAME};

pub use featcov_cluster::{Cluster, ClusterStats, Clustering, DensityParams, GraphParams};
pub use featcov_coverage::{
    Coverage, CoverageReport, CoveredFeature, DataQualityIssue, Feature, ItemRole, MatchResult,
    ReferenceFeature, UncoveredFeature, DEFAULT_THRESHOLD as DEFAULT_COVERAGE_THRESHOLD,
};
pub use featcov_vecsim::IdentifiedVector;
