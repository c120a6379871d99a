//! Profile management commands.

use clap::{Args, Subcommand};

use featcov_cli::Profile;

use super::{get_config, output, print_success, StrategyKind};
use crate::Cli;

/// Manage analysis profiles.
///
/// A profile stores analysis defaults (thresholds and clustering
/// parameters). Flags given to a command override the profile.
///
/// Configuration is stored in ~/.featcov/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add or replace a profile
    #[command(name = "add-profile")]
    AddProfile {
        /// Profile name
        name: String,
        /// Coverage threshold
        #[arg(long)]
        threshold: Option<f64>,
        /// Density clustering epsilon
        #[arg(long)]
        epsilon: Option<f64>,
        /// Density clustering min points
        #[arg(long)]
        min_points: Option<usize>,
        /// Threshold used by graph clustering and consolidation
        #[arg(long)]
        cluster_threshold: Option<f64>,
        /// Minimum component size kept by graph clustering
        #[arg(long)]
        min_cluster_size: Option<usize>,
        /// Default clustering strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyKind>,
        /// Also make it the current profile
        #[arg(long)]
        current: bool,
    },
    /// Delete a profile
    #[command(name = "delete-profile")]
    DeleteProfile {
        /// Profile name
        name: String,
    },
    /// Set the current profile
    #[command(name = "use-profile")]
    UseProfile {
        /// Profile name
        name: String,
    },
    /// Display a profile (the current one by default)
    #[command(name = "get-profile")]
    GetProfile {
        /// Profile name
        name: Option<String>,
    },
    /// List all profiles
    #[command(name = "list-profiles", alias = "get-profiles")]
    ListProfiles,
    /// View the current configuration
    View,
}

fn show<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddProfile {
                name,
                threshold,
                epsilon,
                min_points,
                cluster_threshold,
                min_cluster_size,
                strategy,
                current,
            } => {
                let mut cfg = get_config(cli)?;
                let profile = Profile {
                    threshold: *threshold,
                    epsilon: *epsilon,
                    min_points: *min_points,
                    cluster_threshold: *cluster_threshold,
                    min_cluster_size: *min_cluster_size,
                    strategy: strategy.map(|s| s.as_str().to_string()),
                    ..Default::default()
                };
                cfg.add_profile(name, profile)?;
                if *current {
                    cfg.use_profile(name)?;
                }
                print_success(&format!("Profile \"{}\" added", name));
                Ok(())
            }

            ConfigSubcommand::DeleteProfile { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_profile(name)?;
                print_success(&format!("Profile \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseProfile { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_profile(name)?;
                print_success(&format!("Switched to profile \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetProfile { name } => {
                let cfg = get_config(cli)?;
                match cfg.resolve_profile(name.as_deref())? {
                    Some(p) => output(cli).write(p),
                    None => {
                        println!("No current profile set");
                        Ok(())
                    }
                }
            }

            ConfigSubcommand::ListProfiles => {
                let cfg = get_config(cli)?;
                if cfg.profiles.is_empty() {
                    println!("No profiles configured");
                    return Ok(());
                }

                println!(
                    "{:<8} {:<20} {:<10} {:<10} {:<10} {}",
                    "CURRENT", "NAME", "THRESHOLD", "EPSILON", "MINPTS", "STRATEGY"
                );
                for (name, p) in &cfg.profiles {
                    let current = if name == &cfg.current_profile { "*" } else { "" };
                    println!(
                        "{:<8} {:<20} {:<10} {:<10} {:<10} {}",
                        current,
                        name,
                        show(p.threshold),
                        show(p.epsilon),
                        show(p.min_points),
                        p.strategy.as_deref().unwrap_or("-"),
                    );
                }
                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;
                println!("Config file: {}", cfg.path().display());
                println!("Current profile: {}", cfg.current_profile);
                println!("Profiles: {}", cfg.profiles.len());

                for (name, p) in &cfg.profiles {
                    println!("\n  {}:", name);
                    if let Some(v) = p.threshold {
                        println!("    Threshold: {}", v);
                    }
                    if let Some(v) = p.epsilon {
                        println!("    Epsilon: {}", v);
                    }
                    if let Some(v) = p.min_points {
                        println!("    Min points: {}", v);
                    }
                    if let Some(v) = p.cluster_threshold {
                        println!("    Cluster threshold: {}", v);
                    }
                    if let Some(v) = p.min_cluster_size {
                        println!("    Min cluster size: {}", v);
                    }
                    if let Some(v) = &p.strategy {
                        println!("    Strategy: {}", v);
                    }
                }
                Ok(())
            }
        }
    }
}
