use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoverageError;
use crate::feature::Feature;

/// Descriptive fields of the candidate that covered a reference feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedFeature {
    pub id: String,
    pub feature: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub section_text: String,
}

impl From<&Feature> for MatchedFeature {
    fn from(f: &Feature) -> Self {
        Self {
            id: f.id.clone(),
            feature: f.feature.clone(),
            description: f.description.clone(),
            section_text: f.section_text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveredFeature {
    pub reference_feature_id: String,
    pub matched_feature: MatchedFeature,
    pub similarity: f64,
}

/// A reference feature nothing covered. `similarity` is the closest miss
/// (0.0 when no candidate could be compared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncoveredFeature {
    pub reference_feature_id: String,
    pub similarity: f64,
}

/// Which side of the comparison an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRole {
    Reference,
    Candidate,
}

/// An item left out of similarity computation because it had no embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    pub item_id: String,
    pub role: ItemRole,
    pub reason: String,
}

impl DataQualityIssue {
    pub fn missing_embedding(item_id: impl Into<String>, role: ItemRole) -> Self {
        Self {
            item_id: item_id.into(),
            role,
            reason: "missing embedding".into(),
        }
    }
}

/// Covered and uncovered reference features of one coverage run.
///
/// Built up with [`add_covered`](Self::add_covered) and
/// [`add_uncovered`](Self::add_uncovered), then finalized with
/// [`compute_percentage`](Self::compute_percentage). Adding after
/// finalization clears the percentage until it is computed again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    coverage_percentage: Option<f64>,
    covered_count: usize,
    uncovered_count: usize,
    #[serde(default)]
    covered_features: Vec<CoveredFeature>,
    #[serde(default)]
    uncovered_features: Vec<UncoveredFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    data_quality: Vec<DataQualityIssue>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_covered(&mut self, feature: CoveredFeature) {
        self.covered_features.push(feature);
        self.covered_count = self.covered_features.len();
        self.coverage_percentage = None;
    }

    pub fn add_uncovered(&mut self, feature: UncoveredFeature) {
        self.uncovered_features.push(feature);
        self.uncovered_count = self.uncovered_features.len();
        self.coverage_percentage = None;
    }

    pub fn record_issue(&mut self, issue: DataQualityIssue) {
        self.data_quality.push(issue);
    }

    /// Computes and stores the percentage from the current counts.
    /// Calling it again yields the same value.
    pub fn compute_percentage(&mut self) -> f64 {
        let pct = coverage_percentage(self.covered_count, self.uncovered_count);
        self.coverage_percentage = Some(pct);
        pct
    }

    /// `None` until [`compute_percentage`](Self::compute_percentage) runs.
    pub fn coverage_percentage(&self) -> Option<f64> {
        self.coverage_percentage
    }

    pub fn is_finalized(&self) -> bool {
        self.coverage_percentage.is_some()
    }

    pub fn covered_count(&self) -> usize {
        self.covered_count
    }

    pub fn uncovered_count(&self) -> usize {
        self.uncovered_count
    }

    pub fn total(&self) -> usize {
        self.covered_count + self.uncovered_count
    }

    pub fn covered_features(&self) -> &[CoveredFeature] {
        &self.covered_features
    }

    pub fn uncovered_features(&self) -> &[UncoveredFeature] {
        &self.uncovered_features
    }

    pub fn data_quality(&self) -> &[DataQualityIssue] {
        &self.data_quality
    }

    pub fn is_covered(&self, reference_id: &str) -> bool {
        self.covered_features
            .iter()
            .any(|c| c.reference_feature_id == reference_id)
    }
}

/// `covered / (covered + uncovered) * 100`, rounded to two decimals.
/// 0.0 when both counts are zero.
pub fn coverage_percentage(covered: usize, uncovered: usize) -> f64 {
    let total = covered + uncovered;
    if total == 0 {
        return 0.0;
    }
    let pct = covered as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// A finalized coverage run plus the metadata the report store keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Assigned by the report store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub coverage: Coverage,
    /// Number of candidate features supplied.
    pub provided_features: usize,
    /// Number of reference features compared.
    #[serde(alias = "totalSummaryFeatures")]
    pub total_reference_features: usize,
    pub threshold: f64,
    /// Always true here: a report only exists for a finished analysis.
    /// Kept because stored reports carry the flag.
    pub success: bool,
    pub report_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CoverageReport {
    /// Wraps a finalized coverage. Fails if the percentage was never
    /// computed or `report_name` is blank.
    pub fn new(coverage: Coverage, report_name: impl Into<String>) -> Result<Self, CoverageError> {
        if !coverage.is_finalized() {
            return Err(CoverageError::NotFinalized);
        }
        let report_name = report_name.into();
        if report_name.trim().is_empty() {
            return Err(CoverageError::MissingReportName);
        }
        Ok(Self {
            id: None,
            total_reference_features: coverage.total(),
            coverage,
            provided_features: 0,
            threshold: 0.0,
            success: true,
            report_name,
            description: String::new(),
            created_at: Utc::now(),
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_provided_features(mut self, n: usize) -> Self {
        self.provided_features = n;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Shortcut for `coverage.coverage_percentage()`; always set here.
    pub fn percentage(&self) -> f64 {
        self.coverage.coverage_percentage().unwrap_or(0.0)
    }
}
