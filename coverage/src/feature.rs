use featcov_vecsim::IdentifiedVector;
use serde::{Deserialize, Serialize};

/// Anything carrying an identifier and possibly an embedding.
pub trait Embedded {
    fn id(&self) -> &str;

    /// The embedding, or `None` when it is missing or empty.
    fn embedding(&self) -> Option<&[f32]>;
}

/// A feature extracted from a provided document: the candidate side of a
/// coverage run and the input of clustering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,

    /// Short feature name.
    #[serde(default)]
    pub feature: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub evidence: String,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default, alias = "source_title", skip_serializing_if = "String::is_empty")]
    pub source_title: String,

    /// Text of the section the feature was extracted from.
    #[serde(default, alias = "section_text", skip_serializing_if = "String::is_empty")]
    pub section_text: String,

    #[serde(default, alias = "file_path", skip_serializing_if = "String::is_empty")]
    pub file_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Feature {
    pub fn new(id: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            feature: feature.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_section_text(mut self, text: impl Into<String>) -> Self {
        self.section_text = text.into();
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Pairs the id with the embedding, or `None` if there is no embedding.
    pub fn to_identified(&self) -> Option<IdentifiedVector> {
        self.embedding()
            .map(|v| IdentifiedVector::new(self.id.clone(), v.to_vec()))
    }
}

impl Embedded for Feature {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|v| !v.is_empty())
    }
}

/// A feature of the canonical reference list that provided documents are
/// expected to cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceFeature {
    pub id: String,

    #[serde(default)]
    pub feature: String,

    #[serde(default)]
    pub description: String,

    /// Points a reviewer checks to confirm the feature is present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl ReferenceFeature {
    pub fn new(id: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            feature: feature.into(),
            ..Default::default()
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

impl Embedded for ReferenceFeature {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|v| !v.is_empty())
    }
}

impl Embedded for IdentifiedVector {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        Some(self.as_slice()).filter(|v| !v.is_empty())
    }
}
