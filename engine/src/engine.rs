use featcov_cluster::{Clustering, DensityParams, GraphParams};
use featcov_coverage::{Coverage, CoverageReport, Feature, ReferenceFeature};
use featcov_vecsim::IdentifiedVector;
use tracing::{debug, info};

use crate::error::EngineError;
use crate::request::{check_threshold, ClusterRequest, CoverageRequest, Strategy};

/// Similarity above which two items are treated as duplicates when
/// consolidating.
pub const DEFAULT_CONSOLIDATION_THRESHOLD: f64 = 0.92;

/// Entry point for every similarity operation.
///
/// Holds no state; construct one and share it freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Cosine similarity of two vectors of equal length.
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> Result<f64, EngineError> {
        Ok(featcov_vecsim::cosine_similarity(a, b)?)
    }

    /// `1 - similarity`.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f64, EngineError> {
        Ok(featcov_vecsim::cosine_distance(a, b)?)
    }

    pub fn cluster_density(
        &self,
        items: &[IdentifiedVector],
        params: &DensityParams,
    ) -> Result<Clustering, EngineError> {
        Ok(featcov_cluster::cluster_density(items, params)?)
    }

    pub fn cluster_threshold(
        &self,
        items: &[IdentifiedVector],
        params: &GraphParams,
    ) -> Result<Clustering, EngineError> {
        Ok(featcov_cluster::cluster_threshold(items, params)?)
    }

    /// Dispatches to the clustering algorithm named by `strategy`.
    pub fn cluster(
        &self,
        items: &[IdentifiedVector],
        strategy: &Strategy,
    ) -> Result<Clustering, EngineError> {
        match strategy {
            Strategy::Density(p) => self.cluster_density(items, p),
            Strategy::Threshold(p) => self.cluster_threshold(items, p),
        }
    }

    /// Reduces near-duplicates to one representative each.
    ///
    /// Items are grouped by threshold-graph clustering; the first item of
    /// every group is kept, in group order. Singletons are kept too.
    pub fn consolidate(
        &self,
        items: &[IdentifiedVector],
        threshold: f64,
    ) -> Result<Vec<String>, EngineError> {
        let clustering = self.cluster_threshold(items, &GraphParams::new(threshold))?;
        let kept: Vec<String> = clustering
            .representatives()
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(
            input = items.len(),
            kept = kept.len(),
            threshold,
            "consolidated"
        );
        Ok(kept)
    }

    pub fn analyze_coverage(
        &self,
        references: &[ReferenceFeature],
        candidates: &[Feature],
        threshold: f64,
    ) -> Result<Coverage, EngineError> {
        Ok(featcov_coverage::analyze_coverage(
            references, candidates, threshold,
        )?)
    }

    /// Validates the request, runs the coverage analysis and wraps the
    /// result in a report.
    pub fn run_coverage(&self, req: &CoverageRequest) -> Result<CoverageReport, EngineError> {
        req.validate()?;

        let coverage = self.analyze_coverage(&req.references, &req.candidates, req.threshold)?;
        let report = CoverageReport::new(coverage, req.report_name.clone())?
            .with_threshold(req.threshold)
            .with_provided_features(req.candidates.len())
            .with_description(req.description.clone());

        info!(
            report = %report.report_name,
            covered = report.coverage.covered_count(),
            total = report.total_reference_features,
            percentage = report.percentage(),
            "coverage report ready"
        );
        Ok(report)
    }

    /// Validates the request and clusters its items.
    pub fn run_cluster(&self, req: &ClusterRequest) -> Result<Clustering, EngineError> {
        let items = req.validate()?;
        self.cluster(&items, &req.strategy)
    }

    /// Consolidates feature records, checking the threshold first.
    pub fn consolidate_features(
        &self,
        features: &[Feature],
        threshold: f64,
    ) -> Result<Vec<String>, EngineError> {
        check_threshold(threshold)?;
        let items = crate::request::identified(features)?;
        self.consolidate(&items, threshold)
    }
}
