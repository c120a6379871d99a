//! Groups embeddings of near-duplicate items by cosine similarity.
//!
//! Two strategies share the same input and output types:
//!
//! - [`cluster_density`]: DBSCAN over cosine distance. Sparse outliers are
//!   left out of every cluster.
//! - [`cluster_threshold`]: connected components of the graph whose edges are
//!   pairs with similarity above a threshold. Every item lands in exactly one
//!   component.
//!
//! # Usage
//!
//! ```
//! use featcov_cluster::{cluster_threshold, GraphParams};
//! use featcov_vecsim::IdentifiedVector;
//!
//! let items = vec![
//!     IdentifiedVector::new("login", vec![1.0, 0.0, 0.0]),
//!     IdentifiedVector::new("sign-in", vec![0.98, 0.1, 0.0]),
//!     IdentifiedVector::new("export", vec![0.0, 0.0, 1.0]),
//! ];
//!
//! let result = cluster_threshold(&items, &GraphParams::new(0.9)).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.representatives(), vec!["login", "export"]);
//! ```
//!
//! Enable the `parallel` feature to spread the pairwise comparisons of
//! [`cluster_threshold`] over the rayon thread pool. The output is identical.

mod cluster;
mod dbscan;
mod error;
mod graph;

pub use cluster::{Cluster, ClusterStats, Clustering};
pub use dbscan::{cluster_density, DensityParams, DEFAULT_EPSILON, DEFAULT_MIN_POINTS};
pub use error::ClusterError;
pub use graph::{cluster_threshold, GraphParams, DEFAULT_THRESHOLD};
