//! featcov - cluster extracted features and measure how well they cover a
//! reference list, using precomputed embeddings.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    ClusterCommand, ConfigCommand, ConsolidateCommand, CoverageCommand, SimilarityCommand,
};

/// featcov - feature clustering and coverage over embeddings.
///
/// Inputs are YAML or JSON files of features carrying an `embedding`
/// array. Analysis defaults can be kept in named profiles stored in
/// ~/.featcov/config.yaml, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "featcov")]
#[command(about = "Embedding similarity, clustering and coverage tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.featcov/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Profile name to use
    #[arg(short = 'p', long, global = true)]
    pub profile: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage analysis profiles
    Config(ConfigCommand),
    /// Group near-duplicate features
    Cluster(ClusterCommand),
    /// Check which reference features are covered
    Coverage(CoverageCommand),
    /// Keep one representative per group of near-duplicates
    Consolidate(ConsolidateCommand),
    /// Cosine similarity of two vectors
    Similarity(SimilarityCommand),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Cluster(cmd) => cmd.run(&cli),
        Commands::Coverage(cmd) => cmd.run(&cli),
        Commands::Consolidate(cmd) => cmd.run(&cli),
        Commands::Similarity(cmd) => cmd.run(&cli),
    }
}
