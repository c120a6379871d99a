use std::fmt;

use serde::{Deserialize, Serialize};

/// A group of identifiers that belong together.
///
/// Membership is what matters; the order of `members` is discovery order and
/// carries no meaning beyond picking a representative.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cluster {
    members: Vec<String>,
}

impl Cluster {
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn into_members(self) -> Vec<String> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    /// The first member discovered; stands in for the whole group when
    /// near-duplicates are collapsed.
    pub fn representative(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.members).finish()
    }
}

/// Result of one clustering run.
///
/// `clusters` never overlap. `unclustered` holds every input identifier that
/// is not in a returned cluster: DBSCAN noise, or members of threshold-graph
/// components dropped by the minimum size. Together they account for every
/// input exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    pub clusters: Vec<Cluster>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unclustered: Vec<String>,
}

impl Clustering {
    /// Number of returned clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Returns the cluster containing `id`, if any.
    pub fn cluster_of(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(id))
    }

    /// First member of every cluster, in cluster order.
    pub fn representatives(&self) -> Vec<&str> {
        self.clusters
            .iter()
            .filter_map(Cluster::representative)
            .collect()
    }

    /// Flattens into plain identifier lists.
    pub fn into_id_lists(self) -> Vec<Vec<String>> {
        self.clusters.into_iter().map(Cluster::into_members).collect()
    }

    pub fn stats(&self) -> ClusterStats {
        ClusterStats::from_clusters(&self.clusters)
    }
}

/// Summary numbers over the returned clusters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    /// Identifiers inside returned clusters.
    pub total_features: usize,
    pub total_clusters: usize,
    pub largest_cluster_size: usize,
    /// 0.0 when there are no clusters.
    pub average_cluster_size: f64,
}

impl ClusterStats {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let total_features: usize = clusters.iter().map(Cluster::len).sum();
        let total_clusters = clusters.len();
        let largest_cluster_size = clusters.iter().map(Cluster::len).max().unwrap_or(0);
        let average_cluster_size = if total_clusters > 0 {
            total_features as f64 / total_clusters as f64
        } else {
            0.0
        };
        Self {
            total_features,
            total_clusters,
            largest_cluster_size,
            average_cluster_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(ids: &[&str]) -> Cluster {
        Cluster::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn representative_is_first_member() {
        let c = cluster(&["b", "a", "c"]);
        assert_eq!(c.representative(), Some("b"));
        assert!(c.contains("c"));
        assert!(!c.contains("d"));
        assert_eq!(Cluster::new(vec![]).representative(), None);
    }

    #[test]
    fn clustering_lookup_and_representatives() {
        let result = Clustering {
            clusters: vec![cluster(&["a", "b"]), cluster(&["c"])],
            unclustered: vec!["d".into()],
        };
        assert_eq!(result.len(), 2);
        assert_eq!(result.cluster_of("b"), Some(&result.clusters[0]));
        assert!(result.cluster_of("d").is_none());
        assert_eq!(result.representatives(), vec!["a", "c"]);
        assert_eq!(
            result.into_id_lists(),
            vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
        );
    }

    #[test]
    fn stats() {
        let stats = ClusterStats::from_clusters(&[cluster(&["a", "b", "c"]), cluster(&["d"])]);
        assert_eq!(stats.total_features, 4);
        assert_eq!(stats.total_clusters, 2);
        assert_eq!(stats.largest_cluster_size, 3);
        assert_eq!(stats.average_cluster_size, 2.0);
    }

    #[test]
    fn stats_empty() {
        let stats = Clustering::default().stats();
        assert_eq!(stats.total_clusters, 0);
        assert_eq!(stats.largest_cluster_size, 0);
        assert_eq!(stats.average_cluster_size, 0.0);
    }

    #[test]
    fn serializes_clusters_as_id_lists() {
        let result = Clustering {
            clusters: vec![cluster(&["a", "b"])],
            unclustered: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"clusters":[["a","b"]]}"#);

        let stats = serde_json::to_value(result.stats()).unwrap();
        assert_eq!(stats["largestClusterSize"], 2);
    }
}
