//! Caller-facing request shapes and their validation.
//!
//! Loose input (files, HTTP bodies) is decoded into these types and checked
//! here; the engine itself only sees validated collections.

use featcov_cluster::{DensityParams, GraphParams};
use featcov_coverage::{Feature, ReferenceFeature, DEFAULT_THRESHOLD};
use featcov_vecsim::IdentifiedVector;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Report name used when a coverage request does not set one.
pub const DEFAULT_REPORT_NAME: &str = "feature_coverage";

/// Which clustering algorithm to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    Density(DensityParams),
    Threshold(GraphParams),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Density(DensityParams::default())
    }
}

impl Strategy {
    pub fn validate(&self) -> Result<(), RequestError> {
        match self {
            Strategy::Density(p) => {
                if !(p.epsilon.is_finite() && p.epsilon >= 0.0) {
                    return Err(RequestError::InvalidEpsilon(p.epsilon));
                }
                if p.min_points == 0 {
                    return Err(RequestError::InvalidMinPoints);
                }
            }
            Strategy::Threshold(p) => check_threshold(p.threshold)?,
        }
        Ok(())
    }
}

/// Checks that a similarity threshold is a number in `[0, 1]`.
pub fn check_threshold(threshold: f64) -> Result<(), RequestError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(RequestError::ThresholdOutOfRange(threshold))
    }
}

/// Items to cluster and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterRequest {
    pub items: Vec<Feature>,
    #[serde(default)]
    pub strategy: Strategy,
}

impl ClusterRequest {
    pub fn new(items: Vec<Feature>, strategy: Strategy) -> Self {
        Self { items, strategy }
    }

    /// Checks the strategy and returns the items as identified vectors.
    /// Every item needs an embedding.
    pub fn validate(&self) -> Result<Vec<IdentifiedVector>, RequestError> {
        self.strategy.validate()?;
        identified(&self.items)
    }
}

/// Converts features to identified vectors, rejecting any without an
/// embedding.
pub fn identified(items: &[Feature]) -> Result<Vec<IdentifiedVector>, RequestError> {
    items
        .iter()
        .map(|f| {
            f.to_identified()
                .ok_or_else(|| RequestError::MissingEmbedding { id: f.id.clone() })
        })
        .collect()
}

/// A coverage analysis to run and record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRequest {
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// The canonical list that should be covered.
    #[serde(default)]
    pub references: Vec<ReferenceFeature>,

    /// The provided features.
    #[serde(alias = "features")]
    pub candidates: Vec<Feature>,

    #[serde(default = "default_report_name")]
    pub report_name: String,

    #[serde(default)]
    pub description: String,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_report_name() -> String {
    DEFAULT_REPORT_NAME.to_string()
}

impl CoverageRequest {
    pub fn new(references: Vec<ReferenceFeature>, candidates: Vec<Feature>) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            references,
            candidates,
            report_name: default_report_name(),
            description: String::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_report_name(mut self, name: impl Into<String>) -> Self {
        self.report_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.candidates.is_empty() {
            return Err(RequestError::EmptyCandidates);
        }
        check_threshold(self.threshold)
    }
}
