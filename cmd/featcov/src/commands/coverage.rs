use clap::Args;

use featcov_engine::{CoverageRequest, Feature, ReferenceFeature, SimilarityEngine};

use super::{get_settings, load_input, output};
use crate::Cli;

/// Check which reference features the provided features cover.
///
/// Prints a coverage report: covered references with their best match,
/// uncovered references with their closest similarity, and the coverage
/// percentage.
#[derive(Args)]
pub struct CoverageCommand {
    /// Reference features file (YAML or JSON)
    #[arg(short = 'r', long = "references")]
    references: String,

    /// Provided features file (YAML or JSON, `-` for stdin)
    #[arg(short = 'f', long = "file")]
    file: String,

    /// Similarity a match must reach, between 0.0 and 1.0
    #[arg(long)]
    threshold: Option<f64>,

    /// Report name
    #[arg(long)]
    name: Option<String>,

    /// Report description
    #[arg(long)]
    description: Option<String>,
}

impl CoverageCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let settings = get_settings(cli)?;

        let references: Vec<ReferenceFeature> = load_input(&self.references)?;
        let candidates: Vec<Feature> = load_input(&self.file)?;

        let mut req = CoverageRequest::new(references, candidates)
            .with_threshold(self.threshold.unwrap_or(settings.threshold));
        if let Some(name) = &self.name {
            req = req.with_report_name(name.clone());
        }
        if let Some(desc) = &self.description {
            req = req.with_description(desc.clone());
        }

        let report = SimilarityEngine::new().run_coverage(&req)?;

        output(cli).write(&report)
    }
}
