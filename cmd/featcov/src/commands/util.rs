//! Helpers shared by the commands.

use std::path::PathBuf;

use clap::ValueEnum;
use featcov_cli::{load_config, Config, Output, Profile};
use featcov_engine::{
    DensityParams, GraphParams, Strategy, DEFAULT_CONSOLIDATION_THRESHOLD,
    DEFAULT_COVERAGE_THRESHOLD,
};

use crate::Cli;

/// Clustering algorithm selectable from the command line and profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyKind {
    #[default]
    Density,
    Threshold,
}

impl StrategyKind {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "density" | "dbscan" => Ok(Self::Density),
            "threshold" | "graph" => Ok(Self::Threshold),
            other => anyhow::bail!("unknown strategy '{}' (expected density or threshold)", other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Density => "density",
            Self::Threshold => "threshold",
        }
    }
}

/// Analysis defaults after applying the selected profile on top of the
/// built-in values. Command flags are applied on top of this.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub threshold: f64,
    pub epsilon: f64,
    pub min_points: usize,
    pub cluster_threshold: f64,
    pub min_cluster_size: usize,
    pub strategy: StrategyKind,
}

impl Default for Settings {
    fn default() -> Self {
        let density = DensityParams::default();
        Self {
            threshold: DEFAULT_COVERAGE_THRESHOLD,
            epsilon: density.epsilon,
            min_points: density.min_points,
            cluster_threshold: DEFAULT_CONSOLIDATION_THRESHOLD,
            min_cluster_size: 0,
            strategy: StrategyKind::Density,
        }
    }
}

impl Settings {
    pub fn from_profile(profile: Option<&Profile>) -> anyhow::Result<Self> {
        let mut s = Self::default();
        let Some(p) = profile else {
            return Ok(s);
        };
        if let Some(v) = p.threshold {
            s.threshold = v;
        }
        if let Some(v) = p.epsilon {
            s.epsilon = v;
        }
        if let Some(v) = p.min_points {
            s.min_points = v;
        }
        if let Some(v) = p.cluster_threshold {
            s.cluster_threshold = v;
        }
        if let Some(v) = p.min_cluster_size {
            s.min_cluster_size = v;
        }
        if let Some(v) = &p.strategy {
            s.strategy = StrategyKind::parse(v)?;
        }
        Ok(s)
    }

    pub fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Density => Strategy::Density(DensityParams {
                epsilon: self.epsilon,
                min_points: self.min_points,
            }),
            StrategyKind::Threshold => Strategy::Threshold(
                GraphParams::new(self.cluster_threshold)
                    .with_min_cluster_size(self.min_cluster_size),
            ),
        }
    }
}

pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Settings from the profile named with `-p`, or the current profile.
pub fn get_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let cfg = get_config(cli)?;
    let profile = cfg.resolve_profile(cli.profile.as_deref())?;
    if let Some(p) = profile {
        tracing::debug!(profile = %p.name, "using profile");
    }
    Settings::from_profile(profile)
}

pub fn output(cli: &Cli) -> Output {
    Output::from_flags(cli.json, cli.output.as_ref().map(PathBuf::from))
}

pub fn load_input<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    featcov_cli::load_request(path).map_err(|e| anyhow::anyhow!("{}: {}", path, e))
}

pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}
