//! CLI commands module.

mod cluster;
mod config;
mod consolidate;
mod coverage;
mod similarity;
mod util;

pub use cluster::ClusterCommand;
pub use config::ConfigCommand;
pub use consolidate::ConsolidateCommand;
pub use coverage::CoverageCommand;
pub use similarity::SimilarityCommand;

pub(crate) use util::*;
