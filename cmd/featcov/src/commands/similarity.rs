use clap::Args;
use serde::Serialize;

use featcov_engine::SimilarityEngine;

use super::output;
use crate::Cli;

/// Cosine similarity of two vectors given inline.
///
/// Example: featcov similarity --a 1,0,0 --b 0.9,0.1,0
#[derive(Args)]
pub struct SimilarityCommand {
    /// First vector, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    a: Vec<f32>,

    /// Second vector, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    b: Vec<f32>,
}

#[derive(Serialize)]
struct SimilarityOutput {
    similarity: f64,
    distance: f64,
}

impl SimilarityCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let engine = SimilarityEngine::new();
        output(cli).write(&SimilarityOutput {
            similarity: engine.similarity(&self.a, &self.b)?,
            distance: engine.distance(&self.a, &self.b)?,
        })
    }
}
