use clap::Args;
use serde::Serialize;

use featcov_engine::{Feature, SimilarityEngine};

use super::{get_settings, load_input, output};
use crate::Cli;

/// Keep one representative per group of near-duplicate features.
#[derive(Args)]
pub struct ConsolidateCommand {
    /// Features file (YAML or JSON, `-` for stdin)
    #[arg(short = 'f', long = "file")]
    file: String,

    /// Similarity above which two features are duplicates
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsolidateOutput {
    input_count: usize,
    kept_count: usize,
    kept: Vec<String>,
}

impl ConsolidateCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let settings = get_settings(cli)?;
        let threshold = self.threshold.unwrap_or(settings.cluster_threshold);

        let items: Vec<Feature> = load_input(&self.file)?;
        let kept = SimilarityEngine::new().consolidate_features(&items, threshold)?;

        output(cli).write(&ConsolidateOutput {
            input_count: items.len(),
            kept_count: kept.len(),
            kept,
        })
    }
}
