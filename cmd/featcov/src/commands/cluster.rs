use clap::Args;
use serde::Serialize;

use featcov_engine::{ClusterRequest, ClusterStats, Clustering, Feature, SimilarityEngine};

use super::{get_settings, load_input, output, StrategyKind};
use crate::Cli;

/// Group near-duplicate features.
///
/// The input file holds a list of features, each with an `embedding`.
#[derive(Args)]
pub struct ClusterCommand {
    /// Features file (YAML or JSON, `-` for stdin)
    #[arg(short = 'f', long = "file")]
    file: String,

    /// Clustering algorithm
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Density: maximum cosine distance between neighbours
    #[arg(long)]
    epsilon: Option<f64>,

    /// Density: points needed around a core point, itself included
    #[arg(long)]
    min_points: Option<usize>,

    /// Threshold: similarity an edge must exceed
    #[arg(long)]
    threshold: Option<f64>,

    /// Threshold: drop groups with at most this many members
    #[arg(long)]
    min_cluster_size: Option<usize>,

    /// Include cluster statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Serialize)]
struct ClusterOutput {
    #[serde(flatten)]
    clustering: Clustering,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ClusterStats>,
}

impl ClusterCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut settings = get_settings(cli)?;
        if let Some(v) = self.strategy {
            settings.strategy = v;
        }
        if let Some(v) = self.epsilon {
            settings.epsilon = v;
        }
        if let Some(v) = self.min_points {
            settings.min_points = v;
        }
        if let Some(v) = self.threshold {
            settings.cluster_threshold = v;
        }
        if let Some(v) = self.min_cluster_size {
            settings.min_cluster_size = v;
        }

        let items: Vec<Feature> = load_input(&self.file)?;
        tracing::debug!(
            items = items.len(),
            strategy = settings.strategy.as_str(),
            "clustering"
        );

        let req = ClusterRequest::new(items, settings.strategy());
        let clustering = SimilarityEngine::new().run_cluster(&req)?;
        let stats = self.stats.then(|| clustering.stats());

        output(cli).write(&ClusterOutput { clustering, stats })
    }
}
