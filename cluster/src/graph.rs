use featcov_vecsim::{check_dimensions, cosine_similarity_unchecked, IdentifiedVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::{Cluster, Clustering};
use crate::error::ClusterError;

/// Default edge threshold for threshold-graph clustering.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Parameters for threshold-graph clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphParams {
    /// Two items are connected when their similarity is strictly greater.
    pub threshold: f64,

    /// Components with at most this many members are dropped.
    /// 0 keeps every component, isolated items included.
    pub min_cluster_size: usize,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_cluster_size: 0,
        }
    }
}

impl GraphParams {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }
}

/// Groups items into the connected components of the similarity graph.
///
/// Compares every unordered pair once. Components are ordered by their
/// lowest input index; members are listed in traversal order starting from
/// that item. Identifiers of dropped components end up in
/// [`Clustering::unclustered`].
pub fn cluster_threshold(
    items: &[IdentifiedVector],
    params: &GraphParams,
) -> Result<Clustering, ClusterError> {
    check_dimensions(items)?;

    let vectors: Vec<&[f32]> = items.iter().map(IdentifiedVector::as_slice).collect();
    let adj = adjacency(&vectors, params.threshold);
    let components = connected_components(&adj);

    let mut result = Clustering::default();
    for component in components {
        let members: Vec<String> = component.into_iter().map(|i| items[i].id.clone()).collect();
        if members.len() <= params.min_cluster_size {
            result.unclustered.extend(members);
        } else {
            result.clusters.push(Cluster::new(members));
        }
    }

    debug!(
        items = items.len(),
        clusters = result.clusters.len(),
        dropped = result.unclustered.len(),
        threshold = params.threshold,
        min_cluster_size = params.min_cluster_size,
        "threshold clustering done"
    );

    Ok(result)
}

/// Builds sorted, symmetric adjacency lists.
fn adjacency(vectors: &[&[f32]], threshold: f64) -> Vec<Vec<usize>> {
    let upper = upper_edges(vectors, threshold);
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); vectors.len()];
    for (i, neighbors) in upper.into_iter().enumerate() {
        for j in neighbors {
            adj[i].push(j);
            adj[j].push(i);
        }
    }
    adj
}

/// For every i, the j > i it connects to.
#[cfg(not(feature = "parallel"))]
fn upper_edges(vectors: &[&[f32]], threshold: f64) -> Vec<Vec<usize>> {
    (0..vectors.len())
        .map(|i| row_edges(vectors, i, threshold))
        .collect()
}

#[cfg(feature = "parallel")]
fn upper_edges(vectors: &[&[f32]], threshold: f64) -> Vec<Vec<usize>> {
    use rayon::prelude::*;

    (0..vectors.len())
        .into_par_iter()
        .map(|i| row_edges(vectors, i, threshold))
        .collect()
}

fn row_edges(vectors: &[&[f32]], i: usize, threshold: f64) -> Vec<usize> {
    ((i + 1)..vectors.len())
        .filter(|&j| cosine_similarity_unchecked(vectors[i], vectors[j]) > threshold)
        .collect()
}

/// Iterative depth-first search. Each node is visited exactly once.
fn connected_components(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adj.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let mut stack = vec![start];
        let mut component = Vec::new();
        while let Some(node) = stack.pop() {
            component.push(node);
            // Reversed so the lowest neighbour is popped first.
            for &next in adj[node].iter().rev() {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use featcov_vecsim::VecSimError;

    use super::*;

    fn items(vectors: &[(&str, &[f32])]) -> Vec<IdentifiedVector> {
        vectors
            .iter()
            .map(|(id, v)| IdentifiedVector::new(*id, v.to_vec()))
            .collect()
    }

    /// Two items at similarity 0.9 and one orthogonal to both.
    fn pair_and_outlier() -> Vec<IdentifiedVector> {
        let s = (1.0f64 - 0.81).sqrt() as f32;
        items(&[
            ("x", &[1.0, 0.0, 0.0]),
            ("y", &[0.9, s, 0.0]),
            ("z", &[0.0, 0.0, 1.0]),
        ])
    }

    #[test]
    fn pair_and_isolated_node() {
        let result = cluster_threshold(&pair_and_outlier(), &GraphParams::new(0.85)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.clusters[0].members(), ["x", "y"]);
        assert_eq!(result.clusters[1].members(), ["z"]);
        assert!(result.unclustered.is_empty());
    }

    #[test]
    fn min_cluster_size_drops_small_components() {
        let params = GraphParams::new(0.85).with_min_cluster_size(1);
        let result = cluster_threshold(&pair_and_outlier(), &params).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.clusters[0].members(), ["x", "y"]);
        assert_eq!(result.unclustered, vec!["z".to_string()]);

        let params = GraphParams::new(0.85).with_min_cluster_size(2);
        let result = cluster_threshold(&pair_and_outlier(), &params).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.unclustered.len(), 3);
    }

    #[test]
    fn edge_requires_strictly_greater_similarity() {
        // Identical vectors: similarity exactly 1.0.
        let input = items(&[("a", &[1.0, 0.0]), ("b", &[1.0, 0.0])]);
        let at = cluster_threshold(&input, &GraphParams::new(1.0)).unwrap();
        assert_eq!(at.len(), 2, "similarity == threshold must not connect");

        let below = cluster_threshold(&input, &GraphParams::new(0.999)).unwrap();
        assert_eq!(below.len(), 1);
    }

    #[test]
    fn transitive_components() {
        // a-b and b-c connect, a-c does not: still one component.
        let input = items(&[
            ("a", &[1.0, 0.0]),
            ("c", &[1.0, 0.2]),
            ("far", &[0.0, 1.0]),
            ("b", &[1.0, 0.1]),
        ]);
        let result = cluster_threshold(&input, &GraphParams::new(0.99)).unwrap();
        assert_eq!(result.len(), 2);
        let first = &result.clusters[0];
        assert_eq!(first.len(), 3);
        assert_eq!(first.representative(), Some("a"));
        assert!(first.contains("b") && first.contains("c"));
        assert_eq!(result.clusters[1].members(), ["far"]);
    }

    #[test]
    fn zero_vectors_stay_isolated() {
        let input = items(&[("z1", &[0.0, 0.0]), ("z2", &[0.0, 0.0])]);
        let result = cluster_threshold(&input, &GraphParams::new(0.0)).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn empty_input() {
        let result = cluster_threshold(&[], &GraphParams::default()).unwrap();
        assert!(result.is_empty());
        assert!(result.unclustered.is_empty());
    }

    #[test]
    fn rejects_mixed_dimensions_before_work() {
        let input = items(&[("a", &[1.0, 0.0]), ("b", &[1.0])]);
        let err = cluster_threshold(&input, &GraphParams::default()).unwrap_err();
        assert!(matches!(
            err,
            ClusterError::InvalidInput(VecSimError::InconsistentDimension { .. })
        ));
    }

    #[test]
    fn components_visit_every_node_once() {
        let adj = vec![vec![1, 2], vec![0], vec![0], vec![], vec![5], vec![4]];
        let components = connected_components(&adj);
        assert_eq!(components, vec![vec![0, 1, 2], vec![3], vec![4, 5]]);
    }
}
